mod common;

#[cfg(test)]
mod tests {
    use crate::common;
    use pc_reader::{PcReaderError, PipelineConfig, parse_case_line, read_case_file};

    fn small_config() -> PipelineConfig {
        PipelineConfig {
            max_additional_diagnoses: 3,
            max_procedures: 2,
            ..PipelineConfig::default()
        }
    }

    #[test]
    fn test_parse_case_line_fixed_fields() {
        let config = small_config();
        let line = "77;42;0;3500;M;01;00;5;0;12;A01.0;B02;C03;;Z37.1:20;Z40:10";
        let case = parse_case_line(line, 1, &config).unwrap();

        assert_eq!(case.id, "77");
        assert_eq!(case.age_years, "42");
        assert_eq!(case.age_days, "0");
        assert_eq!(case.adm_weight, "3500");
        assert_eq!(case.sex, "M");
        assert_eq!(case.adm, "01");
        assert_eq!(case.sep, "00");
        assert_eq!(case.los, "5");
        assert_eq!(case.sdf, "0");
        assert_eq!(case.hmv, "12");
        assert_eq!(case.pdx, "A01.0");
    }

    #[test]
    fn test_parse_case_line_tail_projection() {
        let config = small_config();
        let line = "77;42;0;3500;M;01;00;5;0;12;A01.0;B02;C03;;Z37.1:20;Z40:10";
        let case = parse_case_line(line, 1, &config).unwrap();

        // first three tail entries are diagnosis slots, empty slot preserved
        assert_eq!(case.additional_diagnoses, vec!["B02", "C03", ""]);
        // next two are procedures with the type marker stripped
        assert_eq!(case.procedures, vec!["Z37.1", "Z40"]);
    }

    #[test]
    fn test_parse_case_line_short_tail() {
        let config = small_config();
        let line = "77;42;0;3500;M;01;00;5;0;12;A01.0;B02";
        let case = parse_case_line(line, 1, &config).unwrap();

        assert_eq!(case.additional_diagnoses, vec!["B02"]);
        assert!(case.procedures.is_empty());
    }

    #[test]
    fn test_parse_case_line_no_tail() {
        let config = small_config();
        let case = parse_case_line("77;42;0;3500;M;01;00;5;0;12;A01.0", 1, &config).unwrap();

        assert!(case.additional_diagnoses.is_empty());
        assert!(case.procedures.is_empty());
    }

    #[test]
    fn test_parse_case_line_ignores_tail_overflow() {
        let config = small_config();
        let line = "77;42;0;3500;M;01;00;5;0;12;A01.0;B02;C03;D04;Z37:1;Z40:2;Z99:3";
        let case = parse_case_line(line, 1, &config).unwrap();

        assert_eq!(case.additional_diagnoses.len(), 3);
        assert_eq!(case.procedures.len(), 2);
    }

    #[test]
    fn test_parse_case_line_too_few_fields() {
        let config = small_config();
        let err = parse_case_line("77;42;0", 9, &config).unwrap_err();

        match err {
            PcReaderError::Parse { line, .. } => assert_eq!(line, 9),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_case_file_skips_blank_lines() {
        let config = small_config();
        let path = common::write_scratch(
            "cases.csv",
            "77;42;0;3500;M;01;00;5;0;12;A01.0;B02\n\n78;7;30;2800;F;01;00;2;0;0;C03\n",
        );
        let cases = read_case_file(&path, &config).unwrap();

        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0].id, "77");
        assert_eq!(cases[1].id, "78");
        assert_eq!(cases[1].sex, "F");
    }

    #[test]
    fn test_read_case_file_aborts_on_malformed_row() {
        let config = small_config();
        let path = common::write_scratch(
            "cases.csv",
            "77;42;0;3500;M;01;00;5;0;12;A01.0\nbroken;row\n",
        );

        assert!(matches!(
            read_case_file(&path, &config),
            Err(PcReaderError::Parse { line: 2, .. })
        ));
    }
}
