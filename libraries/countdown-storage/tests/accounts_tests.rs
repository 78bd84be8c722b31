//! Integration tests for the accounts slice


use countdown_core::{types::NewAccount, AccountRepository, CountdownError};
use test_helpers::*;

fn new_account(username: &str, email: &str) -> NewAccount {
    NewAccount {
        username: username.to_string(),
        email: email.to_string(),
        password_hash: "$2b$04$placeholder".to_string(),
    }
}

#[tokio::test]
async fn test_create_and_find() {
    let test_db = TestDb::new().await;

    let created = test_db
        .store
        .create_account(new_account("alice", "a@x.com"))
        .await
        .unwrap();

    let by_id = test_db.store.find_account(created.id).await.unwrap().unwrap();
    assert_eq!(by_id, created);

    let by_name = test_db
        .store
        .find_account_by_username("alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_name.id, created.id);

    let by_email = test_db
        .store
        .find_account_by_email("a@x.com")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(by_email.id, created.id);

    assert!(test_db
        .store
        .find_account_by_username("bob")
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_unique_username_and_email() {
    let test_db = TestDb::new().await;
    test_db
        .store
        .create_account(new_account("alice", "a@x.com"))
        .await
        .unwrap();

    let err = test_db
        .store
        .create_account(new_account("alice", "other@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, CountdownError::Conflict(_)), "{err:?}");

    let err = test_db
        .store
        .create_account(new_account("someone", "a@x.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, CountdownError::Conflict(_)), "{err:?}");

    assert_eq!(test_db.store.list_accounts().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_sorted_by_username() {
    let test_db = TestDb::new().await;
    for name in ["zoe", "mallory", "bob"] {
        create_test_account(test_db.pool(), name).await;
    }

    let names: Vec<String> = test_db
        .store
        .list_accounts()
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.username)
        .collect();
    assert_eq!(names, vec!["bob", "mallory", "zoe"]);
}
