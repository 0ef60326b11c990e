use std::time::Duration;

use tokio::time::timeout;
use vocably_instance::pid::read_pid_file;
use vocably_instance::{ClaimOutcome, Command, InstanceEndpoint, InstanceError, claim, send_command};

fn endpoint(dir: &tempfile::TempDir) -> InstanceEndpoint {
    InstanceEndpoint {
        socket: dir.path().join("vocably.sock"),
        pid_file: dir.path().join("vocably.pid"),
    }
}

#[tokio::test]
async fn first_claim_becomes_primary() {
    let dir = tempfile::tempdir().unwrap();
    let ep = endpoint(&dir);
    let (tx, _rx) = kanal::bounded_async::<Command>(8);

    let outcome = claim(&ep, tx).await;
    let guard = match outcome {
        ClaimOutcome::Primary(guard) => guard,
        ClaimOutcome::Secondary => panic!("expected primary"),
    };

    assert!(!guard.is_degraded());
    assert!(ep.socket.exists());
    assert_eq!(read_pid_file(&ep.pid_file), Some(std::process::id()));
}

#[tokio::test]
async fn second_claim_defers_and_forwards_show_window() {
    let dir = tempfile::tempdir().unwrap();
    let ep = endpoint(&dir);
    let (tx, rx) = kanal::bounded_async::<Command>(8);

    let _guard = match claim(&ep, tx).await {
        ClaimOutcome::Primary(guard) => guard,
        ClaimOutcome::Secondary => panic!("expected primary"),
    };

    let (tx2, _rx2) = kanal::bounded_async::<Command>(8);
    match claim(&ep, tx2).await {
        ClaimOutcome::Secondary => {}
        ClaimOutcome::Primary(_) => panic!("expected secondary"),
    }

    let cmd = timeout(Duration::from_secs(2), rx.recv())
        .await
        .expect("forwarded command never arrived")
        .unwrap();
    assert_eq!(cmd, Command::ShowWindow);
}

#[tokio::test]
async fn primary_answers_hide_and_quit() {
    let dir = tempfile::tempdir().unwrap();
    let ep = endpoint(&dir);
    let (tx, rx) = kanal::bounded_async::<Command>(8);

    let _guard = match claim(&ep, tx).await {
        ClaimOutcome::Primary(guard) => guard,
        ClaimOutcome::Secondary => panic!("expected primary"),
    };

    assert!(send_command(&ep.socket, Command::HideWindow).await.unwrap());
    assert!(send_command(&ep.socket, Command::Quit).await.unwrap());

    assert_eq!(rx.recv().await.unwrap(), Command::HideWindow);
    assert_eq!(rx.recv().await.unwrap(), Command::Quit);
}

#[tokio::test]
async fn stale_socket_is_recovered() {
    let dir = tempfile::tempdir().unwrap();
    let ep = endpoint(&dir);

    // A crashed primary leaves its socket file behind with nobody
    // listening.
    {
        let _stale = std::os::unix::net::UnixListener::bind(&ep.socket).unwrap();
    }
    assert!(ep.socket.exists());

    let (tx, _rx) = kanal::bounded_async::<Command>(8);
    match claim(&ep, tx).await {
        ClaimOutcome::Primary(guard) => assert!(!guard.is_degraded()),
        ClaimOutcome::Secondary => panic!("expected primary after stale socket"),
    }
}

#[tokio::test]
async fn concurrent_claims_elect_exactly_one_listening_primary() {
    let dir = tempfile::tempdir().unwrap();
    let ep = endpoint(&dir);

    let (tx_a, _rx_a) = kanal::bounded_async::<Command>(8);
    let (tx_b, _rx_b) = kanal::bounded_async::<Command>(8);

    let ep_a = ep.clone();
    let ep_b = ep.clone();
    let race = async {
        tokio::join!(claim(&ep_a, tx_a), claim(&ep_b, tx_b))
    };
    let (a, b) = timeout(Duration::from_secs(10), race)
        .await
        .expect("claim race must not hang");

    let mut listening = 0;
    let mut guards = Vec::new();
    for outcome in [a, b] {
        if let ClaimOutcome::Primary(guard) = outcome {
            if !guard.is_degraded() {
                listening += 1;
            }
            guards.push(guard);
        }
    }

    assert_eq!(listening, 1, "exactly one claimant may own the listener");
    assert!(!guards.is_empty());
}

#[tokio::test]
async fn release_removes_footprint_and_frees_the_identity() {
    let dir = tempfile::tempdir().unwrap();
    let ep = endpoint(&dir);
    let (tx, _rx) = kanal::bounded_async::<Command>(8);

    let mut guard = match claim(&ep, tx).await {
        ClaimOutcome::Primary(guard) => guard,
        ClaimOutcome::Secondary => panic!("expected primary"),
    };

    guard.release();
    assert!(!ep.pid_file.exists());
    assert!(!ep.socket.exists());

    // The identity can be claimed again.
    let (tx2, _rx2) = kanal::bounded_async::<Command>(8);
    match claim(&ep, tx2).await {
        ClaimOutcome::Primary(guard) => assert!(!guard.is_degraded()),
        ClaimOutcome::Secondary => panic!("expected fresh primary"),
    }
}

#[tokio::test]
async fn send_command_with_no_primary_fails_fast() {
    let dir = tempfile::tempdir().unwrap();
    let socket = dir.path().join("vocably.sock");

    let started = std::time::Instant::now();
    let err = send_command(&socket, Command::ShowWindow).await.unwrap_err();
    assert!(matches!(err, InstanceError::Connect(_)));
    assert!(started.elapsed() < Duration::from_secs(5));
}
