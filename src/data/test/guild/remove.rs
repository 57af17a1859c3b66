use super::*;

/// Tests removing a persisted guild.
///
/// Expected: Ok(true) and guild no longer persisted
#[tokio::test]
async fn removes_persisted_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guilds(db, &["1", "2"]).await?;

    let repo = GuildRepository::new(db);
    let removed = repo.remove("1").await?;

    assert!(removed);
    assert!(!repo.contains("1").await?);
    assert!(repo.contains("2").await?);

    Ok(())
}

/// Tests removing an unknown guild.
///
/// Expected: Ok(false) and other guilds untouched
#[tokio::test]
async fn remove_unknown_guild_returns_false() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guilds(db, &["1"]).await?;

    let repo = GuildRepository::new(db);
    let removed = repo.remove("404").await?;

    assert!(!removed);
    assert_eq!(Guild::find().count(db).await?, 1);

    Ok(())
}

/// Tests removing twice.
///
/// Expected: first call Ok(true), second Ok(false)
#[tokio::test]
async fn second_remove_returns_false() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guilds(db, &["1"]).await?;

    let repo = GuildRepository::new(db);

    assert!(repo.remove("1").await?);
    assert!(!repo.remove("1").await?);

    Ok(())
}
