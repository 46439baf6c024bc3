use std::collections::{HashMap, HashSet};

use engine::{
    Money, PlayerRef, Position, RejectReason, SlotIndex, TeamId, TransferController,
    TransferEvent, TransferOutcome,
};

fn money(value: &str) -> Money {
    value.parse().unwrap()
}

fn player(id: &str, price: &str, position: Position, team: &str) -> PlayerRef {
    PlayerRef::new(id, format!("Player {id}"), money(price), position, team)
}

/// Roster of two: a keeper from A and a defender from B, 10.00 left.
fn two_slot_session() -> TransferController {
    TransferController::new(
        vec![
            player("1", "4.0", Position::Goalkeeper, "A"),
            player("2", "5.0", Position::Defender, "B"),
        ],
        money("10.0"),
    )
    .unwrap()
}

fn snapshot(ctl: &TransferController) -> (engine::RosterModel, engine::BudgetLedger, engine::SelectionState) {
    (ctl.roster().clone(), *ctl.ledger(), *ctl.selection())
}

fn assert_invariants(ctl: &TransferController) {
    let roster = ctl.roster();
    let ledger = ctl.ledger();

    assert_eq!(ledger.remaining() + roster.total_price(), ledger.initial());
    assert!(!ledger.remaining().is_negative());

    let mut per_team: HashMap<&TeamId, usize> = HashMap::new();
    for entry in roster.entries() {
        *per_team.entry(&entry.player.team).or_default() += 1;
    }
    assert!(per_team.values().all(|count| *count <= engine::MAX_PER_TEAM));

    let ids: HashSet<_> = roster.entries().iter().map(|e| &e.player.id).collect();
    assert_eq!(ids.len(), roster.len());

    if let Some(slot) = ctl.selection().current() {
        assert!(roster.entry(slot).is_ok());
    }
}

#[test]
fn same_position_cheaper_swap_is_committed() {
    let mut ctl = two_slot_session();
    ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
    let outcome = ctl
        .handle(TransferEvent::PickCandidate(player("3", "3.0", Position::Goalkeeper, "A")))
        .unwrap();

    assert!(matches!(outcome, TransferOutcome::Committed(_)));
    assert_eq!(ctl.roster().entry(SlotIndex(0)).unwrap().player.id.as_str(), "3");
    assert_eq!(ctl.ledger().remaining(), money("11.0"));
    assert_eq!(ctl.selection().current(), None);
    assert_invariants(&ctl);
}

#[test]
fn position_mismatch_leaves_state_untouched() {
    let mut ctl = two_slot_session();
    ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
    let before = snapshot(&ctl);

    let outcome = ctl
        .handle(TransferEvent::PickCandidate(player("4", "7.0", Position::Defender, "C")))
        .unwrap();

    let TransferOutcome::Rejected(reason) = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(reason.code(), "position mismatch");
    assert_eq!(snapshot(&ctl), before);
    assert_eq!(ctl.selection().current(), Some(SlotIndex(0)));
}

#[test]
fn full_team_blocks_incoming_from_that_team() {
    let mut ctl = TransferController::new(
        vec![
            player("1", "4.0", Position::Goalkeeper, "A"),
            player("2", "5.0", Position::Defender, "B"),
            player("5", "1.0", Position::Midfielder, "A"),
            player("6", "1.0", Position::Attacker, "A"),
        ],
        money("10.0"),
    )
    .unwrap();
    ctl.handle(TransferEvent::SelectEntry(SlotIndex(1))).unwrap();
    let before = snapshot(&ctl);

    let outcome = ctl
        .handle(TransferEvent::PickCandidate(player("7", "2.0", Position::Defender, "A")))
        .unwrap();

    assert_eq!(
        outcome,
        TransferOutcome::Rejected(RejectReason::TeamQuotaExceeded { team: TeamId::from("A") })
    );
    assert_eq!(snapshot(&ctl), before);
}

#[test]
fn owned_candidate_is_rejected() {
    let mut ctl = two_slot_session();
    ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
    let before = snapshot(&ctl);

    let outcome = ctl
        .handle(TransferEvent::PickCandidate(player("2", "5.0", Position::Defender, "B")))
        .unwrap();

    let TransferOutcome::Rejected(reason) = outcome else {
        panic!("expected rejection, got {outcome:?}");
    };
    assert_eq!(reason.code(), "already owned");
    assert_eq!(snapshot(&ctl), before);
}

#[test]
fn picking_without_selection_reports_no_selection() {
    let mut ctl = two_slot_session();
    let before = snapshot(&ctl);

    let outcome = ctl
        .handle(TransferEvent::PickCandidate(player("3", "1.0", Position::Goalkeeper, "C")))
        .unwrap();

    assert_eq!(outcome, TransferOutcome::NoSelection);
    assert_eq!(snapshot(&ctl), before);
}

#[test]
fn candidate_above_available_budget_is_rejected() {
    let mut ctl = two_slot_session();
    ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
    let before = snapshot(&ctl);

    let outcome = ctl
        .handle(TransferEvent::PickCandidate(player("8", "15.0", Position::Goalkeeper, "C")))
        .unwrap();

    assert_eq!(
        outcome,
        TransferOutcome::Rejected(RejectReason::InsufficientBudget {
            price: money("15.0"),
            available: money("14.0"),
        })
    );
    assert_eq!(snapshot(&ctl), before);
}

#[test]
fn selecting_another_entry_moves_the_arm() {
    let mut ctl = two_slot_session();
    ctl.handle(TransferEvent::SelectEntry(SlotIndex(0))).unwrap();
    let outcome = ctl.handle(TransferEvent::SelectEntry(SlotIndex(1))).unwrap();

    assert_eq!(outcome, TransferOutcome::Armed(SlotIndex(1)));
    assert_eq!(ctl.selection().current(), Some(SlotIndex(1)));
}

/// Drives every slot against every candidate in turn, accepted or not, and
/// checks the invariants after each step.
#[test]
fn invariants_hold_across_long_sequences() {
    let positions = Position::ALL;
    let teams = ["A", "B", "C", "D"];

    let start: Vec<PlayerRef> = (0..8)
        .map(|i| {
            player(
                &format!("r{i}"),
                &format!("{}.{}", 3 + i % 4, (i * 7) % 10),
                positions[i % 4],
                teams[i % 4],
            )
        })
        .collect();
    let pool: Vec<PlayerRef> = (0..24)
        .map(|i| {
            player(
                &format!("c{i}"),
                &format!("{}.{:02}", 1 + (i * 5) % 9, (i * 13) % 100),
                positions[(i / 3) % 4],
                teams[(i * 3) % 4],
            )
        })
        .chain(start.iter().take(2).cloned())
        .collect();

    let mut ctl = TransferController::new(start, money("2.50")).unwrap();
    assert_invariants(&ctl);

    let mut committed = 0usize;
    for round in 0..3 {
        for (step, candidate) in pool.iter().enumerate() {
            let slot = SlotIndex((step + round) % ctl.roster().len());
            ctl.handle(TransferEvent::SelectEntry(slot)).unwrap();
            let before = snapshot(&ctl);

            match ctl.handle(TransferEvent::PickCandidate(candidate.clone())).unwrap() {
                TransferOutcome::Committed(receipt) => {
                    committed += 1;
                    assert_eq!(receipt.remaining_after, ctl.ledger().remaining());
                    assert_eq!(ctl.selection().current(), None);
                }
                TransferOutcome::Rejected(_) => assert_eq!(snapshot(&ctl), before),
                other => panic!("unexpected outcome {other:?}"),
            }
            assert_invariants(&ctl);
        }
    }

    assert_eq!(ctl.history().len(), committed);
    assert!(committed > 0);
}
