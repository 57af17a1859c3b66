use crate::data::{guild::GuildRepository, GuildStore};
use crate::model::guild::GuildRecord;
use entity::prelude::Guild;
use sea_orm::{ColumnTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter};
use test_utils::{builder::TestBuilder, factory};

mod contains;
mod insert;
mod list;
mod remove;
