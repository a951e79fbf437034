use super::support::*;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn recommends_shared_friends_of_friends() {
    let net = Network::new().await;
    net.login(JOHN).await;
    net.send(HAKAN).await;
    net.send(SERRA).await;
    net.login(HAKAN).await;
    net.accept(JOHN).await;
    net.send(DEAN).await;
    net.login(SERRA).await;
    net.accept(JOHN).await;
    net.send(DEAN).await;
    net.login(DEAN).await;
    net.accept(HAKAN).await;
    net.accept(SERRA).await;

    net.login(JOHN).await;
    let recommendations = net.service.recommend_friends().await.expect("recommend");
    assert_eq!(recommendations, names(&[DEAN]));
}

#[tokio::test]
async fn recommends_nobody_when_everyone_is_already_a_friend() {
    let net = Network::new().await;
    for (a, b) in [
        (JOHN, HAKAN),
        (JOHN, SERRA),
        (JOHN, DEAN),
        (HAKAN, SERRA),
        (HAKAN, DEAN),
        (SERRA, DEAN),
    ] {
        net.befriend(a, b).await;
    }

    net.login(JOHN).await;
    let recommendations = net.service.recommend_friends().await.expect("recommend");
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn never_recommends_members_you_blocked() {
    let net = Network::new().await;
    net.login(JOHN).await;
    net.send(HAKAN).await;
    net.send(SERRA).await;
    net.service.block(DEAN).await.expect("block");
    net.login(HAKAN).await;
    net.accept(JOHN).await;
    net.send(DEAN).await;
    net.login(SERRA).await;
    net.accept(JOHN).await;
    net.send(DEAN).await;
    net.login(DEAN).await;
    net.accept(HAKAN).await;
    net.accept(SERRA).await;

    net.login(JOHN).await;
    let recommendations = net.service.recommend_friends().await.expect("recommend");
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn never_recommends_members_who_blocked_you() {
    let net = Network::new().await;
    net.befriend(JOHN, HAKAN).await;
    net.befriend(HAKAN, DEAN).await;
    net.befriend(HAKAN, HASAN).await;
    net.login(DEAN).await;
    net.service.block(JOHN).await.expect("block");

    net.login(JOHN).await;
    let recommendations = net.service.recommend_friends().await.expect("recommend");
    assert_eq!(recommendations, names(&[HASAN]));
}

#[tokio::test]
async fn pending_requests_do_not_count_as_friendship() {
    let net = Network::new().await;
    net.befriend(JOHN, HAKAN).await;
    net.login(HAKAN).await;
    net.send(SERRA).await;

    net.login(JOHN).await;
    let recommendations = net.service.recommend_friends().await.expect("recommend");
    assert!(recommendations.is_empty());
}

#[tokio::test]
async fn recommendation_without_friends_is_empty() {
    let net = Network::new().await;
    net.login(HASAN).await;
    assert_eq!(net.service.recommend_friends().await, Ok(BTreeSet::new()));
}
