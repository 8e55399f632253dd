use super::*;

use chrono::Duration;

fn keys(secret: &[u8]) -> (JwtEncodingKey, JwtDecodingKey) {
    (
        JwtEncodingKey::from_secret(secret),
        JwtDecodingKey::from_secret(secret),
    )
}

#[test]
fn test_session_roundtrip() {
    let (encoding, decoding) = keys(b"Some secret value");
    let exp = Utc::now() + Duration::hours(1);

    let mut session = Session::anonymous();
    assert!(!session.is_modified());
    assert_eq!(None, session.user_id());

    session.log_in(42);
    session.flash(FlashLevel::Success, "Logged in successfully.");
    assert!(session.is_modified());

    let token = session.encode(&encoding, &exp).unwrap();
    let mut decoded = Session::from_jwt(&token, &decoding).unwrap();

    assert!(!decoded.is_modified());
    assert_eq!(Some(42), decoded.user_id());

    let flashes = decoded.take_flashes();
    assert_eq!(
        vec![Flash {
            level: FlashLevel::Success,
            message: "Logged in successfully.".to_string(),
        }],
        flashes
    );
    assert!(decoded.is_modified());
    assert!(decoded.take_flashes().is_empty());
}

#[test]
fn test_session_log_out() {
    let mut session = Session::anonymous();
    session.log_in(7);
    session.log_out();

    assert_eq!(None, session.user_id());
    assert!(session.is_modified());
}

#[test]
fn test_flashes_are_capped() {
    let (encoding, decoding) = keys(b"Some secret value");
    let exp = Utc::now() + Duration::hours(1);

    let mut session = Session::anonymous();
    for i in 0..MAX_FLASHES * 4 {
        session.flash(FlashLevel::Warning, format!("You have already voted for Country{}.", i));
    }

    // Repeated flash-and-redirect cycles keep the token bounded
    let mut token = session.encode(&encoding, &exp).unwrap();
    for i in 0..MAX_FLASHES * 4 {
        let mut next = Session::from_jwt(&token, &decoding).unwrap();
        next.flash(FlashLevel::Warning, format!("Message {}", i));
        token = next.encode(&encoding, &exp).unwrap();
    }
    assert!(token.len() < 4096);

    let flashes = Session::from_jwt(&token, &decoding).unwrap().take_flashes();
    assert_eq!(MAX_FLASHES, flashes.len());
    assert_eq!(format!("Message {}", MAX_FLASHES * 4 - 1), flashes[MAX_FLASHES - 1].message);
    assert_eq!(format!("Message {}", MAX_FLASHES * 3), flashes[0].message);
}

#[test]
fn test_take_flashes_when_empty() {
    let mut session = Session::anonymous();

    assert!(session.take_flashes().is_empty());
    assert!(!session.is_modified());
}

#[test]
fn test_bad_tokens() {
    let (encoding, _) = keys(b"Some secret value");
    let (_, wrong_decoding) = keys(b"Another secret value");
    let exp = Utc::now() + Duration::hours(1);

    let mut session = Session::anonymous();
    session.log_in(1);
    let token = session.encode(&encoding, &exp).unwrap();

    // wrong secret
    assert!(Session::from_jwt(&token, &wrong_decoding).is_err());

    // garbage
    let (_, decoding) = keys(b"Some secret value");
    assert!(Session::from_jwt("not.a.token", &decoding).is_err());

    // expired
    let expired = Utc::now() - Duration::hours(2);
    let token = session.encode(&encoding, &expired).unwrap();
    assert!(Session::from_jwt(&token, &decoding).is_err());
}

#[test]
fn test_claims_format() {
    let mut session = Session::anonymous();
    session.log_in(3);
    session.flash(FlashLevel::Warning, "Careful");

    let json = serde_json::to_value(&session.claims).unwrap();
    assert_eq!(3, json["uid"]);
    assert_eq!("warning", json["flashes"][0]["level"]);
    assert_eq!("Careful", json["flashes"][0]["message"]);

    let anonymous = serde_json::to_value(Session::anonymous().claims).unwrap();
    assert!(anonymous.get("uid").is_none());
    assert!(anonymous.get("flashes").is_none());
}

#[tokio::test]
async fn test_password_hashing() {
    let hash = password::hash_password("Passw0rd!").await.unwrap();

    assert_ne!("Passw0rd!", hash);
    assert!(password::verify_password("Passw0rd!", &hash).await.unwrap());
    assert!(!password::verify_password("passw0rd!", &hash).await.unwrap());

    // salted
    let another = password::hash_password("Passw0rd!").await.unwrap();
    assert_ne!(hash, another);
}

#[tokio::test]
async fn test_malformed_hash() {
    assert!(!password::verify_password("Passw0rd!", "not-a-hash")
        .await
        .unwrap());
}
