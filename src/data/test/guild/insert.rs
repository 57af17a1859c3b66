use super::*;

/// Tests inserting a new guild.
///
/// Expected: Ok(true) with one row persisted
#[tokio::test]
async fn inserts_new_guild() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let created = repo.insert("123456789", "Test Guild").await?;

    assert!(created);

    let db_guild = Guild::find()
        .filter(entity::guild::Column::GuildId.eq("123456789"))
        .one(db)
        .await?
        .unwrap();
    assert_eq!(db_guild.name, "Test Guild");

    Ok(())
}

/// Tests inserting an already persisted guild.
///
/// Verifies that insert is idempotent: no duplicate row is created and the
/// stored name is left untouched.
///
/// Expected: Ok(false) with a single row
#[tokio::test]
async fn insert_existing_guild_is_noop() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::guild::GuildFactory::new(db)
        .guild_id("123456789")
        .name("Original")
        .build()
        .await?;

    let repo = GuildRepository::new(db);
    let created = repo.insert("123456789", "Renamed").await?;

    assert!(!created);

    let count = Guild::find()
        .filter(entity::guild::Column::GuildId.eq("123456789"))
        .count(db)
        .await?;
    assert_eq!(count, 1);
    assert_eq!(
        repo.find_by_guild_id("123456789").await?.unwrap().name,
        "Original"
    );

    Ok(())
}

/// Tests concurrent inserts of the same guild.
///
/// Expected: exactly one insert reports a created record
#[tokio::test]
async fn concurrent_inserts_create_once() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    let (first, second) = tokio::join!(repo.insert("77", "Guild"), repo.insert("77", "Guild"));

    assert_eq!([first?, second?].iter().filter(|created| **created).count(), 1);
    assert_eq!(Guild::find().count(db).await?, 1);

    Ok(())
}

/// Tests inserting guild names with special characters.
///
/// Expected: Ok(true) with name preserved
#[tokio::test]
async fn preserves_special_characters_in_name() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_table(Guild).build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);
    repo.insert("5", "Guild 🎮 with émojis & spëcial ⭐ chars!").await?;

    let stored = repo.find_by_guild_id("5").await?.unwrap();
    assert_eq!(stored.name, "Guild 🎮 with émojis & spëcial ⭐ chars!");

    Ok(())
}

/// Tests inserting when the table does not exist.
///
/// Expected: Err
#[tokio::test]
async fn fails_when_table_missing() -> Result<(), DbErr> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = GuildRepository::new(db);

    assert!(repo.insert("1", "Guild").await.is_err());

    Ok(())
}
