// src/repository/crud.rs
//
// 全リソース共通のCRUDコア。リポジトリはエンティティ型で
// パラメータ化され、一覧フィルタの変換はここで一度だけ行う。

use sea_orm::sea_query::SimpleExpr;
use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ColumnTrait, Condition, DbConn, DbErr, EntityTrait,
    FromQueryResult, IntoActiveModel, PaginatorTrait, PrimaryKeyTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Value,
};
use std::marker::PhantomData;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::shared::query::{Filter, FilterOp, ListParams};

/// 一覧クエリで参照できるカラムの許可リスト。
/// エンティティごとにリポジトリモジュール内で実装する。
pub trait FilterColumns: EntityTrait {
    fn filter_column(name: &str) -> Option<Self::Column>;
}

/// エンティティ型でパラメータ化された共通リポジトリ。
/// リソース固有の検索はエイリアス先の inherent impl で追加する。
pub struct CrudRepository<E: EntityTrait> {
    pub(crate) db: DbConn,
    _entity: PhantomData<E>,
}

impl<E: EntityTrait> Clone for CrudRepository<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> CrudRepository<E>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    pub fn new(db: DbConn) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }

    pub async fn create<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.insert(&self.db).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<E::Model>, DbErr> {
        E::find_by_id(id).one(&self.db).await
    }

    pub async fn update<A>(&self, model: A) -> Result<E::Model, DbErr>
    where
        A: ActiveModelTrait<Entity = E> + ActiveModelBehavior + Send,
        E::Model: IntoActiveModel<A>,
    {
        model.update(&self.db).await
    }

    /// 削除した行数を返す。0 件なら呼び出し側で NotFound にする。
    pub async fn delete_by_id(&self, id: Uuid) -> Result<u64, DbErr> {
        let result = E::delete_by_id(id).exec(&self.db).await?;
        Ok(result.rows_affected)
    }
}

impl<E> CrudRepository<E>
where
    E: FilterColumns,
    E::Model: FromQueryResult + Send + Sync,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<Uuid>,
{
    /// フィルタ・ソート・ページネーションを適用した一覧と、
    /// フィルタに一致する総件数を返す。
    pub async fn find_with_params(&self, params: &ListParams) -> AppResult<(Vec<E::Model>, u64)> {
        let select = apply_list_params::<E>(E::find(), params)?;

        // 総件数はページサイズに関係なくフィルタ全体を数える
        let total = select.clone().count(&self.db).await?;

        let items = select
            .offset(params.offset())
            .limit(params.limit)
            .all(&self.db)
            .await?;

        Ok((items, total))
    }
}

/// `ListParams` を `Select` に変換する。フィルタとソートは挿入順のまま
/// 適用し、未知のカラム名は BadRequest で拒否する。
pub fn apply_list_params<E: FilterColumns>(
    mut select: Select<E>,
    params: &ListParams,
) -> AppResult<Select<E>> {
    let mut condition = Condition::all();

    for filter in &params.filters {
        // 空文字は「フィルタ指定なし」。eq '' のまま通すと
        // NULLでない行まで落としてしまう。
        if filter.is_empty_value() {
            continue;
        }

        let column = E::filter_column(&filter.column).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown filter column: {}", filter.column))
        })?;

        condition = condition.add(build_predicate(column, filter)?);
    }

    select = select.filter(condition);

    for order in &params.order_by {
        let column = E::filter_column(&order.column).ok_or_else(|| {
            AppError::BadRequest(format!("Unknown order-by column: {}", order.column))
        })?;

        select = select.order_by(column, order.direction.into());
    }

    Ok(select)
}

fn build_predicate<C: ColumnTrait>(column: C, filter: &Filter) -> AppResult<SimpleExpr> {
    let value = filter.value.clone();

    Ok(match filter.op {
        FilterOp::Eq => column.eq(value),
        FilterOp::Ne => column.ne(value),
        FilterOp::Gt => column.gt(value),
        FilterOp::Lt => column.lt(value),
        FilterOp::Gte => column.gte(value),
        FilterOp::Lte => column.lte(value),
        FilterOp::Contains => match &filter.value {
            Value::String(Some(s)) => column.contains(s.as_str()),
            _ => {
                return Err(AppError::BadRequest(
                    "Contains filter requires a string value".to_string(),
                ))
            }
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::review_model;
    use crate::shared::query::SortDirection;
    use sea_orm::{DbBackend, QueryTrait};

    fn build_sql(params: &ListParams) -> String {
        let select =
            apply_list_params::<review_model::Entity>(review_model::Entity::find(), params)
                .unwrap();
        select
            .offset(params.offset())
            .limit(params.limit)
            .build(DbBackend::Postgres)
            .to_string()
    }

    #[test]
    fn test_eq_filter_appears_in_sql() {
        let business_id = Uuid::new_v4();
        let params = ListParams::new(1, 10).filter_eq("business_id", business_id);
        let sql = build_sql(&params);

        assert!(sql.contains(r#""reviews"."business_id" ="#));
        assert!(sql.contains(&business_id.to_string()));
    }

    #[test]
    fn test_pagination_is_translated_to_limit_offset() {
        let params = ListParams::new(3, 10);
        let sql = build_sql(&params);

        assert!(sql.contains("LIMIT 10"));
        assert!(sql.contains("OFFSET 20"));
    }

    #[test]
    fn test_order_by_desc() {
        let params = ListParams::new(1, 10).order_by_desc("created_at");
        let sql = build_sql(&params);

        assert!(sql.contains(r#"ORDER BY "reviews"."created_at" DESC"#));
    }

    #[test]
    fn test_order_by_clauses_preserve_insertion_order() {
        let params = ListParams::new(1, 10)
            .order_by("rating", SortDirection::Desc)
            .order_by("created_at", SortDirection::Asc);
        let sql = build_sql(&params);

        let rating_pos = sql.find(r#""reviews"."rating" DESC"#).unwrap();
        let created_pos = sql.find(r#""reviews"."created_at" ASC"#).unwrap();
        assert!(rating_pos < created_pos);
    }

    #[test]
    fn test_filters_preserve_insertion_order() {
        let business_id = Uuid::new_v4();
        let user_id = Uuid::new_v4();
        let params = ListParams::new(1, 10)
            .filter_eq("business_id", business_id)
            .filter_eq("user_id", user_id);
        let sql = build_sql(&params);

        let business_pos = sql.find(r#""reviews"."business_id""#).unwrap();
        let user_pos = sql.find(r#""reviews"."user_id""#).unwrap();
        assert!(business_pos < user_pos);
    }

    #[test]
    fn test_empty_string_filter_is_skipped() {
        let params = ListParams::new(1, 10).filter_eq("business_id", "");
        let sql = build_sql(&params);

        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_unknown_filter_column_is_rejected() {
        let params = ListParams::new(1, 10).filter_eq("password_hash", "x");
        let result =
            apply_list_params::<review_model::Entity>(review_model::Entity::find(), &params);

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_unknown_order_column_is_rejected() {
        let params = ListParams::new(1, 10).order_by_desc("no_such_column");
        let result =
            apply_list_params::<review_model::Entity>(review_model::Entity::find(), &params);

        assert!(matches!(result, Err(AppError::BadRequest(_))));
    }
}
