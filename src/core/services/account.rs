use crate::context::UserInfo;
use crate::core::models::account::Account;
use crate::core::ports::repository::{AccountCommon, Store};
use crate::error::Error;

/// Accounts come into existence on first read, at zero.
pub async fn balance<D>(db: &mut D, user: &UserInfo) -> Result<Account, Error>
where
    D: Store,
{
    AccountCommon::get_or_create(db, &user.id).await
}
