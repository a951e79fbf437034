use super::support::*;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn persists_every_new_account() {
    let net = Network::new().await;
    assert_eq!(net.spy.saves(), 5);

    let _ = net.service.join(JOHN).await;
    assert_eq!(net.spy.saves(), 5);
}

#[tokio::test]
async fn persists_both_sides_of_a_request() {
    let net = Network::new().await;
    net.login(JOHN).await;
    net.send(HAKAN).await;

    assert_eq!(net.spy.updates_of(JOHN), 1);
    assert_eq!(net.spy.updates_of(HAKAN), 1);
    assert_eq!(net.spy.updates(), 2);
}

#[tokio::test]
async fn persists_both_sides_of_an_acceptance() {
    let net = Network::new().await;
    net.befriend(JOHN, HAKAN).await;

    assert_eq!(net.spy.updates_of(JOHN), 2);
    assert_eq!(net.spy.updates_of(HAKAN), 2);
    assert_eq!(net.spy.updates(), 4);
}

#[tokio::test]
async fn persists_both_sides_of_a_rejection() {
    let net = Network::new().await;
    net.login(JOHN).await;
    net.send(HAKAN).await;
    net.login(HAKAN).await;
    net.service.reject_friendship_from(JOHN).await.expect("reject");

    assert_eq!(net.spy.updates_of(JOHN), 2);
    assert_eq!(net.spy.updates_of(HAKAN), 2);
}

#[tokio::test]
async fn persists_both_sides_of_a_block_and_unblock() {
    let net = Network::new().await;
    net.login(JOHN).await;
    net.service.block(HAKAN).await.expect("block");

    assert_eq!(net.spy.updates_of(JOHN), 1);
    assert_eq!(net.spy.updates_of(HAKAN), 1);

    net.service.unblock(HAKAN).await.expect("unblock");
    assert_eq!(net.spy.updates_of(JOHN), 2);
    assert_eq!(net.spy.updates_of(HAKAN), 2);
}

#[tokio::test]
async fn persists_only_the_session_for_auto_accept_toggles() {
    let net = Network::new().await;
    net.login(SERRA).await;
    net.service.auto_accept_friendships().await.expect("auto-accept");
    net.service
        .cancel_auto_accept_friendships()
        .await
        .expect("cancel auto-accept");

    assert_eq!(net.spy.updates_of(SERRA), 2);
    assert_eq!(net.spy.updates(), 2);
}

#[tokio::test]
async fn persists_every_account_touched_by_accept_all() {
    let net = Network::new().await;
    net.login(JOHN).await;
    net.send(SERRA).await;
    net.login(HAKAN).await;
    net.send(SERRA).await;
    net.spy.reset();

    net.login(SERRA).await;
    net.service.accept_all_friendships().await.expect("accept all");

    assert_eq!(net.spy.updates_of(JOHN), 1);
    assert_eq!(net.spy.updates_of(HAKAN), 1);
    assert_eq!(net.spy.updates_of(SERRA), 2);
}

#[tokio::test]
async fn leaving_deletes_the_account_and_updates_each_neighbour_once() {
    let net = Network::new().await;
    net.login(JOHN).await;
    net.send(HAKAN).await;
    net.send(SERRA).await;
    net.login(HAKAN).await;
    net.accept(JOHN).await;
    net.login(JOHN).await;
    net.service.leave().await.expect("leave");

    assert_eq!(net.spy.deletes_of(JOHN), 1);
    assert_eq!(net.spy.deletes(), 1);
    // request, accept, purge
    assert_eq!(net.spy.updates_of(HAKAN), 3);
    // request, purge
    assert_eq!(net.spy.updates_of(SERRA), 2);
    assert_eq!(net.spy.updates(), 8);
}

#[tokio::test]
async fn leaving_cleans_several_sets_with_a_single_update() {
    let net = Network::new().await;
    net.befriend(DEAN, JOHN).await;
    net.login(DEAN).await;
    net.service.block(JOHN).await.expect("block");
    net.spy.reset();

    net.login(JOHN).await;
    net.service.leave().await.expect("leave");

    assert_eq!(net.spy.updates_of(DEAN), 1);
    assert_eq!(
        net.spy
            .calls()
            .into_iter()
            .filter(|call| matches!(call, RepoCall::Delete(_)))
            .collect::<Vec<_>>(),
        vec![RepoCall::Delete(JOHN.to_string())]
    );
}

#[tokio::test]
async fn failed_operations_persist_nothing() {
    let net = Network::new().await;
    net.spy.reset();

    let _ = net.service.send_friendship_to(HAKAN).await;
    net.login(JOHN).await;
    let _ = net.service.send_friendship_to("Anonymous").await;
    let _ = net.service.block("Anonymous").await;

    assert_eq!(net.spy.updates(), 0);
    assert_eq!(net.spy.saves(), 0);
}
