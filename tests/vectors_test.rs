mod common;

#[cfg(test)]
mod tests {
    use crate::common;
    use pc_reader::{
        CodeVectorStore, MissingTokenPolicy, PcReaderError, read_code_tokens, read_token_vectors,
        unitvec,
    };

    #[test]
    fn test_unitvec_scales_to_unit_norm() {
        let normalized = unitvec(vec![3.0, 4.0]);
        common::assert_vec_close(&normalized, &[0.6, 0.8]);
    }

    #[test]
    fn test_unitvec_zero_vector_unchanged() {
        let normalized = unitvec(vec![0.0, 0.0, 0.0]);
        common::assert_vec_close(&normalized, &[0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_read_token_vectors() {
        let path = common::write_scratch(
            "vectors.csv",
            "ICD_A01 1.0 0.0 0.0 0.0\ntyphoid 0.0 1.0 0.0 0.0\n",
        );
        let vectors = read_token_vectors(&path).unwrap();

        assert_eq!(vectors.len(), 2);
        common::assert_vec_close(&vectors["ICD_A01"], &[1.0, 0.0, 0.0, 0.0]);
        common::assert_vec_close(&vectors["typhoid"], &[0.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn test_read_token_vectors_skips_word2vec_header() {
        let path = common::write_scratch(
            "vectors.csv",
            "2 4\nICD_A01 1.0 0.0 0.0 0.0\ntyphoid 0.0 1.0 0.0 0.0\n",
        );
        let vectors = read_token_vectors(&path).unwrap();

        assert_eq!(vectors.len(), 2);
        assert!(!vectors.contains_key("2"));
    }

    #[test]
    fn test_read_token_vectors_dimension_mismatch() {
        let path = common::write_scratch(
            "vectors.csv",
            "ICD_A01 1.0 0.0 0.0 0.0\ntyphoid 0.0 1.0\n",
        );
        let err = read_token_vectors(&path).unwrap_err();

        match err {
            PcReaderError::Parse { line, .. } => assert_eq!(line, 2),
            other => panic!("expected Parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_read_token_vectors_invalid_component() {
        let path = common::write_scratch("vectors.csv", "ICD_A01 1.0 x 0.0 0.0\n");
        assert!(matches!(
            read_token_vectors(&path),
            Err(PcReaderError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_read_code_tokens() {
        let path = common::write_scratch(
            "tokens.csv",
            "ICD_A01;ICD_A01;typhoid\n\nICD_B02;ICD_B02;;\n",
        );
        let code_tokens = read_code_tokens(&path).unwrap();

        assert_eq!(code_tokens.len(), 2);
        assert_eq!(code_tokens[0].0, "ICD_A01");
        assert_eq!(code_tokens[0].1, vec!["ICD_A01", "typhoid"]);
        // empty token slots are dropped
        assert_eq!(code_tokens[1].1, vec!["ICD_B02"]);
    }

    #[test]
    fn test_read_code_tokens_missing_code() {
        let path = common::write_scratch("tokens.csv", ";typhoid\n");
        assert!(matches!(
            read_code_tokens(&path),
            Err(PcReaderError::Parse { line: 1, .. })
        ));
    }

    #[test]
    fn test_store_keeps_token_vectors_in_order() {
        let store = common::store();

        let vectors = store.token_vectors("ICD_A01").unwrap();
        assert_eq!(vectors.len(), 2);
        // first entry is the code's own synthetic token
        common::assert_vec_close(&vectors[0], &[1.0, 0.0, 0.0, 0.0]);
        common::assert_vec_close(&vectors[1], &[0.0, 1.0, 0.0, 0.0]);
        assert_eq!(store.dims(), 4);
        assert_eq!(store.len(), 5);
    }

    #[test]
    fn test_store_aggregate_is_normalized_sum() {
        let store = common::store();

        // sum of [1,0,0,0] and [0,1,0,0], scaled to unit norm
        let expected = [
            1.0 / 2.0_f32.sqrt(),
            1.0 / 2.0_f32.sqrt(),
            0.0,
            0.0,
        ];
        common::assert_vec_close(store.code_vector("ICD_A01").unwrap(), &expected);
    }

    #[test]
    fn test_missing_token_fails_by_default() {
        let mut vector_by_token = common::vector_by_token();
        vector_by_token.remove("typhoid");

        let err = CodeVectorStore::from_parts(
            &vector_by_token,
            &common::code_tokens(),
            MissingTokenPolicy::Fail,
        )
        .unwrap_err();

        match err {
            PcReaderError::MissingToken { code, token } => {
                assert_eq!(code, "ICD_A01");
                assert_eq!(token, "typhoid");
            }
            other => panic!("expected MissingToken error, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_token_skip_drops_the_token() {
        let mut vector_by_token = common::vector_by_token();
        vector_by_token.remove("typhoid");

        let store = CodeVectorStore::from_parts(
            &vector_by_token,
            &common::code_tokens(),
            MissingTokenPolicy::Skip,
        )
        .unwrap();

        assert_eq!(store.token_vectors("ICD_A01").unwrap().len(), 1);
    }

    #[test]
    fn test_missing_token_zero_substitutes() {
        let mut vector_by_token = common::vector_by_token();
        vector_by_token.remove("typhoid");

        let store = CodeVectorStore::from_parts(
            &vector_by_token,
            &common::code_tokens(),
            MissingTokenPolicy::Zero,
        )
        .unwrap();

        let vectors = store.token_vectors("ICD_A01").unwrap();
        assert_eq!(vectors.len(), 2);
        common::assert_vec_close(&vectors[1], &[0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_skip_omits_code_without_any_vector() {
        let mut vector_by_token = common::vector_by_token();
        vector_by_token.remove("ICD_B02");

        let store = CodeVectorStore::from_parts(
            &vector_by_token,
            &common::code_tokens(),
            MissingTokenPolicy::Skip,
        )
        .unwrap();

        // ICD_B02 only had its own token; with that gone the code is invalid
        assert!(!store.contains("ICD_B02"));
        assert!(store.contains("ICD_A01"));
    }

    #[test]
    fn test_export_code_tokens_sorted_json() {
        let store = common::store();
        let path = common::write_scratch("tokens.json", "");
        store.export_code_tokens(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();

        assert_eq!(
            keys,
            vec!["CHOP_P01", "CHOP_P02", "ICD_A01", "ICD_B02", "ICD_C03"]
        );
        assert_eq!(value["ICD_A01"][1], "typhoid");
    }
}
