use models::todo;
use sea_orm::{ConnectionTrait, EntityTrait, QueryOrder};

use crate::errors::ServiceError;

pub async fn list_todos<C: ConnectionTrait>(db: &C) -> Result<Vec<todo::Model>, ServiceError> {
    Ok(todo::Entity::find().order_by_asc(todo::Column::Id).all(db).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::get_db;

    #[tokio::test]
    async fn todos_come_back_in_creation_order() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(list_todos(&db).await?.is_empty());
        todo::create(&db, "walk", "the dog", false).await?;
        todo::create(&db, "feed", "the cat", true).await?;
        let titles: Vec<_> = list_todos(&db).await?.into_iter().map(|t| (t.title, t.is_done)).collect();
        assert_eq!(titles, vec![("walk".to_string(), false), ("feed".to_string(), true)]);
        Ok(())
    }

    #[tokio::test]
    async fn empty_title_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        assert!(todo::create(&db, "  ", "x", false).await.is_err());
        Ok(())
    }
}
