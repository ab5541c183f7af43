mod integration_tests_helper {

    use std::path::PathBuf;

    pub fn test_data(file_name: &str) -> PathBuf {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");

        let mut path = PathBuf::from(manifest_dir);
        path.push("test_data");
        path.push(file_name);
        path
    }

    pub fn temp_file(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("lexdfa_{}_{}.json", name, std::process::id()));
        path
    }
}

mod integration_tests {
    use crate::integration_tests_helper::{temp_file, test_data};

    use lexdfa::{construct_comment_dfa, construct_word_dfa, load_dfa, DFAError, Symbol, FA};

    #[test]
    fn test_word_examples() {
        let mut dfa = construct_word_dfa("foo").unwrap();

        assert!(dfa.run("foo"));
        assert!(!dfa.run("fo"));
        assert!(!dfa.run("food"));
        assert!(!dfa.run("bar"));

        for suffix in ["X", "o", "foo", "\n"] {
            assert!(!dfa.run(&format!("foo{}", suffix)));
        }
    }

    #[test]
    fn test_comment_examples() {
        let mut dfa = construct_comment_dfa();

        assert!(dfa.run("//anything\n"));
        assert!(dfa.run("/*anything*/"));

        assert!(!dfa.run("/"));
        assert!(!dfa.run("/x"));
        assert!(!dfa.run("/*unterminated"));
        assert!(!dfa.run("/* a * b /"));
    }

    #[test]
    fn test_runs_do_not_leak() {
        let mut word = construct_word_dfa("foo").unwrap();
        let mut comment = construct_comment_dfa();

        let word_inputs = ["foo", "x", "foo", "fo", "", "foo"];
        let expected: Vec<bool> = word_inputs.iter().map(|input| *input == "foo").collect();

        let results: Vec<bool> = word_inputs.iter().map(|input| word.run(input)).collect();
        assert_eq!(results, expected);

        // Same inputs in reverse order give the same answers
        let results: Vec<bool> = word_inputs.iter().rev().map(|input| word.run(input)).collect();
        let reversed: Vec<bool> = expected.iter().rev().copied().collect();
        assert_eq!(results, reversed);

        // A rejected run ending in the trap does not affect the next one
        assert!(!comment.run("/*"));
        assert!(!comment.run("x"));
        assert!(comment.run("//\n"));
        assert!(comment.run("//\n"));
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = construct_word_dfa("ab").unwrap();
        let mut second = first.clone();

        first.step('a');
        assert_eq!(first.get_current_state(), 1);
        assert_eq!(second.get_current_state(), 0);

        second.step('b');
        assert_eq!(second.get_current_state(), 3);
        assert_eq!(first.get_current_state(), 1);

        first.step('b');
        assert!(first.is_accepting());
        assert!(!second.is_accepting());
    }

    #[test]
    fn test_trap_absorbs_everything() {
        let word = construct_word_dfa("lexdfa").unwrap();
        let comment = construct_comment_dfa();

        for dfa in [word, comment] {
            let trap = dfa.get_trap_state().unwrap();
            assert!(!dfa.get_acceptor_states()[trap]);

            let transitions = dfa.get_state_transitions(trap);
            assert_eq!(transitions.len(), dfa.get_alphabet().len());
            for (_, target) in transitions {
                assert_eq!(*target, trap);
            }
        }
    }

    #[test]
    fn test_run_file() {
        let mut comment = construct_comment_dfa();

        assert!(comment.run_file(test_data("line_comment.txt")).unwrap());
        assert!(comment.run_file(test_data("block_comment.txt")).unwrap());
        assert!(!comment.run_file(test_data("trailing_code.txt")).unwrap());

        let mut word = construct_word_dfa("lexdfa").unwrap();
        assert!(word.run_file(test_data("word.txt")).unwrap());
        assert!(!word.run_file(test_data("line_comment.txt")).unwrap());

        assert!(word.run_file(test_data("missing.txt")).is_err());
    }

    #[test]
    fn test_save_and_load() {
        let path = temp_file("save_and_load");

        let comment = construct_comment_dfa();
        assert!(comment.save_dfa(&path).is_ok());

        let mut loaded = load_dfa(&path).unwrap();
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.get_num_states(), comment.get_num_states());
        assert_eq!(loaded.get_trap_state(), comment.get_trap_state());
        assert_eq!(loaded.get_final_states(), comment.get_final_states());
        assert_eq!(loaded.get_classifier(), comment.get_classifier());

        assert!(loaded.run("/* saved */"));
        assert!(loaded.run("// saved\n"));
        assert!(!loaded.run("saved"));
    }

    #[test]
    fn test_load_rejects_incomplete_table() {
        let path = temp_file("incomplete_table");

        let word = construct_word_dfa("ab").unwrap();
        word.save_dfa(&path).unwrap();

        // Knock the ANY transition out of the start state
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        json["states"][0]["transitions"]
            .as_object_mut()
            .unwrap()
            .remove("other");
        std::fs::write(&path, json.to_string()).unwrap();

        let result = load_dfa(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());

        let err = result.unwrap_err();
        match err.downcast_ref() {
            Some(DFAError::MissingTransition(0, Symbol::Other)) => {}
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_load_rejects_unknown_target() {
        let path = temp_file("unknown_target");

        let word = construct_word_dfa("ab").unwrap();
        word.save_dfa(&path).unwrap();

        // Point the start state at a state that does not exist
        let contents = std::fs::read_to_string(&path).unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        json["states"][0]["transitions"]["a"] = serde_json::json!(99);
        std::fs::write(&path, json.to_string()).unwrap();

        let result = load_dfa(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());

        let err = result.unwrap_err();
        match err.downcast_ref() {
            Some(DFAError::TargetOutOfRange(0, Symbol::Char('a'), 99)) => {}
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_load_rejects_unknown_trap() {
        let path = temp_file("unknown_trap");

        let word = construct_word_dfa("ab").unwrap();
        word.save_dfa(&path).unwrap();

        let contents = std::fs::read_to_string(&path).unwrap();
        let mut json: serde_json::Value = serde_json::from_str(&contents).unwrap();
        json["trap_state"] = serde_json::json!(50);
        std::fs::write(&path, json.to_string()).unwrap();

        let result = load_dfa(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(result.is_err());

        let err = result.unwrap_err();
        match err.downcast_ref() {
            Some(DFAError::TrapOutOfRange(50)) => {}
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_empty_word() {
        let result = construct_word_dfa("");

        let err = result.unwrap_err();
        match err.downcast_ref() {
            Some(DFAError::EmptyWord) => {}
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_dot_export() {
        let dfa = construct_comment_dfa();
        let dot = dfa.to_dot();

        assert!(dot.starts_with("digraph"));
        assert!(dot.contains("Final 5"));
        assert!(dot.contains("Final 6"));
        assert!(dot.contains("Trap 7"));
    }
}
