use coin_terminal::application::machine::{PaymentMachine, SessionState};
use coin_terminal::application::shared::SharedMachine;
use coin_terminal::domain::amount::Amount;
use coin_terminal::domain::denomination::Denomination;
use coin_terminal::domain::ticket::Ticket;
use coin_terminal::error::PaymentError;
use std::time::Duration;

fn shared() -> SharedMachine {
    SharedMachine::new(PaymentMachine::new(Amount::new(19995)).unwrap())
}

#[tokio::test]
async fn test_session_through_guard() {
    let machine = shared();

    let mut session = machine.begin(Ticket::new(1, Amount::new(450))).await.unwrap();
    session.add_coin(Denomination::C500).unwrap();
    assert_eq!(session.change_due().unwrap(), Amount::new(50));
    let change = session.compute_change().unwrap();
    assert_eq!(change.count(Denomination::C50), 1);
    let ticket = session.close().unwrap();

    assert!(ticket.is_paid());
    let report = machine.snapshot().await;
    assert_eq!(report.state, SessionState::Idle);
    assert_eq!(report.stock_total, Amount::new(19995 + 450));
}

#[tokio::test]
async fn test_dropped_guard_cancels() {
    let machine = shared();

    {
        let mut session = machine.begin(Ticket::new(1, Amount::new(450))).await.unwrap();
        session.add_coin(Denomination::C1000).unwrap();
        session.compute_change().unwrap();
    }

    let report = machine.snapshot().await;
    assert_eq!(report.state, SessionState::Idle);
    assert_eq!(report.stock_total, Amount::new(19995));
    assert!(report.closed_tickets.is_empty());

    // Not recorded as closed, so it can be retried.
    let session = machine.begin(Ticket::new(1, Amount::new(450))).await.unwrap();
    assert!(session.cancel().is_some());
}

#[tokio::test]
async fn test_closed_ticket_rejected_through_shared_machine() {
    let machine = shared();

    let mut session = machine.begin(Ticket::new(3, Amount::new(100))).await.unwrap();
    session.add_coin(Denomination::C100).unwrap();
    session.close().unwrap();

    let result = machine.begin(Ticket::new(3, Amount::new(100))).await;
    assert!(matches!(result, Err(PaymentError::TicketAlreadyProcessed(3))));
    assert!(machine.has_any_available_coins().await);
}

#[tokio::test]
async fn test_sessions_are_serialized() {
    let machine = shared();

    let mut first = machine.begin(Ticket::new(1, Amount::new(450))).await.unwrap();

    let contender = machine.clone();
    let handle = tokio::spawn(async move {
        let mut session = contender
            .begin(Ticket::new(2, Amount::new(100)))
            .await
            .unwrap();
        session.add_coin(Denomination::C100).unwrap();
        session.compute_change().unwrap();
        session.close().unwrap()
    });

    // The second session cannot start while the first holds the machine.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!handle.is_finished());

    first.add_coin(Denomination::C500).unwrap();
    first.compute_change().unwrap();
    first.close().unwrap();

    let second = handle.await.unwrap();
    assert_eq!(second.number, 2);

    let report = machine.snapshot().await;
    assert_eq!(report.closed_tickets.len(), 2);
    assert_eq!(report.stock_total, Amount::new(19995 + 450 + 100));
}
