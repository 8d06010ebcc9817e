use sea_orm::entity::prelude::*;

/// One row per view or click. Rows are only ever inserted.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "analytics")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub business_id: Uuid,
    /// `view` or `click`
    pub event_type: String,
    /// `phone`, `email`, `website`; clicks only
    pub click_type: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "crate::modules::listing::adapter::outgoing::sea_orm_entity::businesses::Entity",
        from = "Column::BusinessId",
        to = "crate::modules::listing::adapter::outgoing::sea_orm_entity::businesses::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Businesses,
}

impl Related<crate::modules::listing::adapter::outgoing::sea_orm_entity::businesses::Entity>
    for Entity
{
    fn to() -> RelationDef {
        Relation::Businesses.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
