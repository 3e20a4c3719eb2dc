use tracker_core::{
    Combatant, Env, Notice, ParticipantId, PcgRng, Priority, RngOracle, Suffix, Target,
    TrackerConfig, TurnEngine, TurnEntry, TurnFlag, TurnOrder, compute_seed,
};

fn pr(text: &str) -> Priority {
    text.parse().expect("valid priority")
}

fn participant_priorities(order: &TurnOrder) -> Vec<Priority> {
    order
        .entries()
        .iter()
        .filter_map(TurnEntry::priority)
        .copied()
        .collect()
}

fn assert_descending(order: &TurnOrder) {
    let priorities = participant_priorities(order);
    for pair in priorities.windows(2) {
        assert!(pair[0] >= pair[1], "{} sorts before {}", pair[0], pair[1]);
    }
}

#[test]
fn start_and_add_keep_descending_order() {
    let config = TrackerConfig::default();
    let engine = TurnEngine::new(&config);
    let rng = PcgRng;

    let roll = |name: &str, nonce: u64| {
        let id = ParticipantId::new(name);
        let seed = compute_seed(99, nonce, &id, 0);
        let score = rng.roll_d20(seed) as i32;
        let tiebreak = (rng.next_u32(seed) % 3) as u8 * 10;
        Combatant::new(id, Priority::new(score, tiebreak))
    };

    let opening: Vec<Combatant> = (0..6).map(|n| roll(&format!("pc{n}"), n)).collect();
    let started = engine.start_combat(&opening, None).expect("start");
    assert_descending(&started.order);

    let latecomers: Vec<Combatant> = (0..12).map(|n| roll(&format!("npc{n}"), 100 + n)).collect();
    let joined = engine
        .add_participants(&started.order, &latecomers, None)
        .expect("add");
    assert_descending(&joined.order);
    assert_eq!(joined.order.len(), 1 + 6 + 12);
}

#[test]
fn tiebreak_digits_decide_equal_scores() {
    let config = TrackerConfig::default();
    let engine = TurnEngine::new(&config);
    let outcome = engine
        .start_combat(
            &[
                Combatant::new("slow", pr("5.03")),
                Combatant::new("second", pr("18.09")),
                Combatant::new("first", pr("18.12")),
            ],
            None,
        )
        .expect("start");

    let rendered: Vec<String> = participant_priorities(&outcome.order)
        .iter()
        .map(ToString::to_string)
        .collect();
    assert_eq!(rendered, ["18.12", "18.09", "5.03"]);
}

#[test]
fn participants_never_occupy_two_slots() {
    let config = TrackerConfig::default();
    let engine = TurnEngine::new(&config);
    let started = engine
        .start_combat(&[Combatant::new("a", pr("10")), Combatant::new("b", pr("8"))], None)
        .expect("start");

    let again = engine
        .add_participants(
            &started.order,
            &[Combatant::new("a", pr("20")), Combatant::new("c", pr("9"))],
            None,
        )
        .expect("add");

    let ids: Vec<&str> = again.order.participant_ids().map(ParticipantId::as_str).collect();
    assert_eq!(ids, ["a", "c", "b"]);
}

#[test]
fn round_scoped_suffix_is_stripped_once() {
    let config = TrackerConfig::default();
    let engine = TurnEngine::new(&config);
    let order = TurnOrder::from_entries(
        vec![
            TurnEntry::participant("b", pr("7")),
            TurnEntry::RoundMarker { round: 2 },
            TurnEntry::participant("a", pr("12!")),
        ],
        &config,
    )
    .expect("valid order");

    let first = engine.advance_turn(&order, Env::empty()).expect("advance");
    assert_eq!(first.order.tail(), Some(&TurnEntry::participant("a", pr("12"))));

    let second = engine.advance_turn(&first.order, Env::empty()).expect("advance");
    assert_eq!(second.order, first.order);
    assert!(!second
        .notices
        .iter()
        .any(|notice| matches!(notice, Notice::SuffixCleared { .. })));
}

#[test]
fn delayed_replaces_readying() {
    let config = TrackerConfig::default();
    let engine = TurnEngine::new(&config);
    let order = TurnOrder::from_entries(vec![TurnEntry::participant("a", pr("11R"))], &config)
        .expect("valid order");

    let outcome = engine
        .set_flag(&order, &Target::Current, Some(TurnFlag::Delayed))
        .expect("flag");
    let priority = outcome.order.front().and_then(TurnEntry::priority).copied();
    assert_eq!(priority.map(|p| p.suffix), Some(Some(Suffix::Delayed)));
    assert_eq!(priority.and_then(|p| p.flag()), Some(TurnFlag::Delayed));
}

#[test]
fn timed_effect_expires_after_three_laps() {
    let config = TrackerConfig::default();
    let engine = TurnEngine::new(&config);
    let started = engine
        .start_combat(
            &[
                Combatant::new("wizard", pr("15")),
                Combatant::new("fighter", pr("12")),
                Combatant::new("rogue", pr("9")),
            ],
            None,
        )
        .expect("start");
    let wizard_turn = engine
        .next_turn(&started.order, Env::empty())
        .expect("next");
    assert_eq!(wizard_turn.order.front(), Some(&TurnEntry::participant("wizard", pr("15"))));

    let hasted = engine
        .add_timed_effect(&wizard_turn.order, "Haste: Wizard", 3)
        .expect("add effect");
    let len = hasted.order.len();
    assert_eq!(hasted.order.entries()[len - 2], TurnEntry::timed_effect("Haste: Wizard", 3));

    let mut order = hasted.order;
    let mut seen_at_front = Vec::new();
    let mut expired = 0;
    for _ in 0..40 {
        let outcome = engine.next_turn(&order, Env::empty()).expect("next");
        expired += outcome
            .notices
            .iter()
            .filter(|notice| matches!(notice, Notice::EffectExpired { .. }))
            .count();
        if let Some(TurnEntry::TimedEffect { remaining, .. }) = outcome.order.front() {
            seen_at_front.push(*remaining);
        }
        order = outcome.order;
    }

    assert_eq!(seen_at_front, [3, 2, 1]);
    assert_eq!(expired, 1);
    assert!(
        order
            .entries()
            .iter()
            .all(|entry| !matches!(entry, TurnEntry::TimedEffect { .. }))
    );
}

#[test]
fn undelay_puts_readied_ahead_of_delayed() {
    let config = TrackerConfig::default();
    let engine = TurnEngine::new(&config);
    let order = TurnOrder::from_entries(
        vec![
            TurnEntry::participant("paladin", pr("14.12")),
            TurnEntry::participant("goblin", pr("11")),
            TurnEntry::participant("Orc2", pr("10D")),
            TurnEntry::RoundMarker { round: 3 },
            TurnEntry::participant("Orc1", pr("17R")),
        ],
        &config,
    )
    .expect("valid order");

    let outcome = engine
        .undelay_and_reinsert(&order, &[ParticipantId::new("Orc1"), ParticipantId::new("Orc2")])
        .expect("undelay");

    assert_eq!(
        outcome.order.entries(),
        [
            TurnEntry::participant("paladin", pr("14.12")),
            TurnEntry::participant("Orc1", pr("14.12")),
            TurnEntry::participant("Orc2", pr("14.12")),
            TurnEntry::participant("goblin", pr("11")),
            TurnEntry::RoundMarker { round: 3 },
        ]
    );
}

#[test]
fn failed_operations_leave_input_untouched() {
    let config = TrackerConfig::default().with_max_entries(3);
    let engine = TurnEngine::new(&config);
    let order = TurnOrder::from_entries(
        vec![
            TurnEntry::RoundMarker { round: 1 },
            TurnEntry::participant("a", pr("10")),
            TurnEntry::participant("b", pr("9")),
        ],
        &config,
    )
    .expect("valid order");
    let snapshot = order.clone();

    assert!(engine.add_timed_effect(&order, "Bless", 3).is_err());
    assert!(
        engine
            .add_participants(&order, &[Combatant::new("c", pr("1"))], None)
            .is_err()
    );
    assert_eq!(order, snapshot);
}
