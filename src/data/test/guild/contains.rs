use super::*;

/// Tests contains for a persisted guild.
///
/// Expected: Ok(true)
#[tokio::test]
async fn finds_persisted_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db)
        .guild_id("528382510455848963")
        .build()
        .await?;

    let repo = GuildRepository::new(db);

    assert!(repo.contains("528382510455848963").await?);

    Ok(())
}

/// Tests contains for an unknown guild.
///
/// Expected: Ok(false)
#[tokio::test]
async fn does_not_find_unknown_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_guild(db).await?;

    let repo = GuildRepository::new(db);

    assert!(!repo.contains("999999999").await?);

    Ok(())
}

/// Tests finding a guild returns its stored name.
///
/// Expected: Ok(Some) with matching record
#[tokio::test]
async fn find_by_guild_id_returns_record() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db)
        .guild_id("42")
        .name("Home")
        .build()
        .await?;

    let repo = GuildRepository::new(db);
    let found = repo.find_by_guild_id("42").await?;

    assert_eq!(found, Some(GuildRecord::new("42", "Home")));

    Ok(())
}
