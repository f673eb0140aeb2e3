//! Logged-in state of the console session.

use crate::accounts::Account;

/// Tracks which account, if any, is logged in for this process run.
#[derive(Default)]
pub struct Session {
    current: Option<Account>,
}

impl Session {
    pub fn login(&mut self, account: Account) {
        self.current = Some(account);
    }

    pub fn logout(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&Account> {
        self.current.as_ref()
    }
}
