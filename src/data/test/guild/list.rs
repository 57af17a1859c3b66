use super::*;

/// Tests listing guilds from an empty table.
///
/// Expected: Ok with empty vector
#[tokio::test]
async fn returns_empty_list_when_no_guilds() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let guilds = repo.list().await?;

    assert!(guilds.is_empty());

    Ok(())
}

/// Tests listing returns every persisted guild in insertion order.
///
/// Expected: Ok with all guilds converted to records
#[tokio::test]
async fn returns_all_guilds_in_insertion_order() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guilds(db, &["333", "111", "222"]).await?;

    let repo = GuildRepository::new(db);
    let guilds = repo.list().await?;

    let ids: Vec<&str> = guilds.iter().map(|g| g.guild_id.as_str()).collect();
    assert_eq!(ids, vec!["333", "111", "222"]);
    assert_eq!(guilds[0], GuildRecord::new("333", "Guild 333"));

    Ok(())
}

/// Tests listing fails when the table does not exist.
///
/// Verifies that store failures surface as errors instead of an empty list.
///
/// Expected: Err
#[tokio::test]
async fn fails_when_table_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let result = repo.list().await;

    assert!(result.is_err());

    Ok(())
}
