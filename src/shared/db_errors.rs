use sea_orm::DbErr;

/// Postgres unique-constraint violation (SQLSTATE 23505), optionally on a
/// constraint whose name contains `constraint_hint`.
pub fn is_unique_violation(err: &DbErr, constraint_hint: Option<&str>) -> bool {
    let msg = err.to_string().to_lowercase();
    let unique = msg.contains("23505")
        || msg.contains("duplicate key")
        || msg.contains("unique constraint");

    unique && constraint_hint.map_or(true, |hint| msg.contains(hint))
}
