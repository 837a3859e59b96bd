#[cfg(test)]
mod tests {
    use crate::battle::state::Side;
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, creature, geodude, hp, log_lines, pikachu,
    };
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use schema::Effectiveness;

    #[test]
    fn test_electric_into_ground_does_nothing() {
        let mut engine = create_test_battle(&pikachu(), &geodude(), vec![0.0, 1.0]);

        let report = assert_ok(engine.submit_move(1));

        let outcome = report.outcome.expect("thunder shock resolved");
        assert!(outcome.hit);
        assert_eq!(outcome.damage, 0);
        assert_eq!(outcome.effectiveness, Effectiveness::Immune);
        assert_eq!(hp(&engine, Side::Second), 115);
        assert_eq!(
            log_lines(&engine)[2..].to_vec(),
            vec!["Pikachu used Thunder Shock!", "It had no effect!"]
        );
        // The turn still passes.
        assert_eq!(engine.snapshot().side_to_act(), Side::Second);
    }

    #[test]
    fn test_immune_even_at_one_hp() {
        let mut engine = create_test_battle(&pikachu(), &geodude(), vec![0.0, 1.0]);
        engine
            .session_mut()
            .combatant_mut(Side::Second)
            .expect("battle has combatants")
            .set_hp(1);

        let report = assert_ok(engine.submit_move(1));

        assert_eq!(hp(&engine, Side::Second), 1);
        assert_eq!(report.outcome.map(|outcome| outcome.defender_fainted), Some(false));
    }

    #[rstest]
    #[case(&["water"], Effectiveness::Super, "It's super effective!")]
    #[case(&["water", "ground"], Effectiveness::Immune, "It had no effect!")]
    #[case(&["ground", "water"], Effectiveness::Immune, "It had no effect!")]
    fn test_dual_type_defenders(
        #[case] defender_types: &[&str],
        #[case] expected: Effectiveness,
        #[case] narration: &str,
    ) {
        let defender = creature(500, "target", [50, 50, 50, 10], defender_types);
        let mut engine = create_test_battle(&pikachu(), &defender, vec![0.0, 1.0]);

        let report = assert_ok(engine.submit_move(1));

        assert_eq!(
            report.outcome.map(|outcome| outcome.effectiveness),
            Some(expected)
        );
        assert_eq!(log_lines(&engine).last().copied(), Some(narration));
    }

    #[test]
    fn test_miss_reports_effectiveness_without_narrating_it() {
        let mut engine = create_test_battle(&pikachu(), &geodude(), vec![1.0]);

        let report = assert_ok(engine.submit_move(1));

        let outcome = report.outcome.expect("thunder shock resolved");
        assert!(!outcome.hit);
        assert_eq!(outcome.effectiveness, Effectiveness::Immune);
        assert_eq!(
            log_lines(&engine).last().copied(),
            Some("Pikachu's attack missed!")
        );
    }
}
