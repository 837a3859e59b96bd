#[cfg(test)]
mod tests {
    use crate::battle::calculators::MoveOutcome;
    use crate::battle::engine::TurnAction;
    use crate::battle::state::{BattleEvent, BattlePhase, Side};
    use crate::battle::tests::common::{
        assert_ok, create_test_battle, hp, log_lines, pikachu, squirtle,
    };
    use pretty_assertions::assert_eq;
    use schema::Effectiveness;

    #[test]
    fn test_super_effective_player_move() {
        // Arrange: hit roll 0, damage factor 1.0
        let mut engine = create_test_battle(&pikachu(), &squirtle(), vec![0.0, 1.0]);

        // Act: Thunder Shock
        let report = assert_ok(engine.submit_move(1));

        // Assert
        assert_eq!(report.side, Side::First);
        assert_eq!(report.action, TurnAction::UsedMove { index: 1 });
        assert_eq!(
            report.outcome,
            Some(MoveOutcome {
                hit: true,
                damage: 35,
                effectiveness: Effectiveness::Super,
                defender_fainted: false,
            })
        );
        assert_eq!(report.phase, BattlePhase::InProgress);
        assert_eq!(hp(&engine, Side::Second), 119 - 35);
        assert_eq!(hp(&engine, Side::First), 110);

        assert_eq!(
            log_lines(&engine),
            vec![
                "Pikachu vs Squirtle!",
                "Battle begins!",
                "Pikachu used Thunder Shock!",
                "It's super effective!",
            ]
        );

        let session = engine.snapshot();
        assert_eq!(session.side_to_act(), Side::Second);
        assert_eq!(session.turn_number(), 2);
        assert!(!session.turn_lock());
    }

    #[test]
    fn test_turn_events_in_order() {
        let mut engine = create_test_battle(&pikachu(), &squirtle(), vec![0.0, 1.0]);

        let report = assert_ok(engine.submit_move(0));

        assert_eq!(
            report.events.events(),
            &[
                BattleEvent::MoveUsed {
                    side: Side::First,
                    attacker: "Pikachu".to_string(),
                    move_name: "Tackle".to_string(),
                },
                BattleEvent::DamageDealt {
                    side: Side::Second,
                    target: "Squirtle".to_string(),
                    damage: 17,
                    remaining_hp: 102,
                },
            ]
        );
    }

    #[test]
    fn test_automated_turn_answers() {
        // Arrange: player's Tackle, then AI picks its second move (Water Gun)
        let outcomes = vec![0.0, 1.0, 0.99, 0.0, 1.0];
        let mut engine = create_test_battle(&pikachu(), &squirtle(), outcomes);
        assert_ok(engine.submit_move(0));
        assert!(engine.is_awaiting_automated_turn());

        // Act
        let report = assert_ok(engine.trigger_automated_turn());

        // Assert
        assert_eq!(report.side, Side::Second);
        assert_eq!(report.action, TurnAction::UsedMove { index: 1 });
        assert_eq!(report.outcome.map(|outcome| outcome.damage), Some(21));
        assert_eq!(hp(&engine, Side::First), 110 - 21);
        assert_eq!(engine.snapshot().side_to_act(), Side::First);
        assert_eq!(engine.snapshot().turn_number(), 3);
        assert!(!engine.is_awaiting_automated_turn());
        assert_eq!(log_lines(&engine).last(), Some(&"Squirtle used Water Gun!"));
    }

    #[test]
    fn test_miss_deals_no_damage_and_passes_turn() {
        // A roll of 100 is never below an accuracy of 100
        let mut engine = create_test_battle(&pikachu(), &squirtle(), vec![1.0]);

        let report = assert_ok(engine.submit_move(0));

        assert_eq!(report.outcome.map(|outcome| outcome.hit), Some(false));
        assert_eq!(report.outcome.map(|outcome| outcome.damage), Some(0));
        assert_eq!(hp(&engine, Side::Second), 119);
        assert_eq!(engine.snapshot().side_to_act(), Side::Second);
        assert_eq!(
            log_lines(&engine)[2..].to_vec(),
            vec!["Pikachu used Tackle!", "Pikachu's attack missed!"]
        );
    }

    #[test]
    fn test_full_accuracy_always_hits() {
        // The highest roll a live stream produces is just below 100.
        let mut engine = create_test_battle(&pikachu(), &squirtle(), vec![0.9999, 0.0]);

        let report = assert_ok(engine.submit_move(0));

        assert_eq!(report.outcome.map(|outcome| outcome.hit), Some(true));
        // 17.529 * 0.85 = 14.9
        assert_eq!(hp(&engine, Side::Second), 119 - 14);
    }

    #[test]
    fn test_log_only_grows() {
        let mut engine = create_test_battle(&pikachu(), &squirtle(), vec![0.5; 15]);

        let mut previous: Vec<String> = engine.snapshot().log().lines().to_vec();
        for _ in 0..3 {
            assert_ok(engine.submit_move(0));
            assert_ok(engine.trigger_automated_turn());

            let current = engine.snapshot().log().lines();
            assert!(current.len() > previous.len());
            assert_eq!(&current[..previous.len()], previous.as_slice());
            previous = current.to_vec();
        }
    }

    #[test]
    fn test_seeded_engines_replay_identically() {
        use crate::battle::engine::BattleEngine;
        use crate::config::BattleConfig;

        let play = || {
            let config = BattleConfig {
                seed: Some(1234),
                ..BattleConfig::default()
            };
            let mut engine = assert_ok(BattleEngine::new(config));
            assert_ok(engine.start_encounter(&pikachu()));
            for _ in 0..5 {
                if engine.snapshot().phase() != BattlePhase::InProgress {
                    break;
                }
                assert_ok(engine.submit_move(0));
                if engine.snapshot().phase() == BattlePhase::InProgress {
                    assert_ok(engine.trigger_automated_turn());
                }
            }
            engine.snapshot().clone()
        };

        assert_eq!(play(), play());
    }
}
