//! Voucher repository for JSON storage
//!
//! Vouchers are stored with their lines inline in vouchers.json, so a
//! voucher and its entries are written together or not at all. An
//! account index speeds up per-account entry queries.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::BookError;
use crate::models::{AccountId, Entry, Money, Voucher, VoucherId};

use super::file_io::{read_json, write_json_atomic};
use super::lock_error;

/// Serializable voucher data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct VoucherData {
    vouchers: Vec<Voucher>,
}

/// Filter for entry queries; unset fields match everything
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EntryQuery {
    /// Only lines posted to this account
    pub account_id: Option<AccountId>,
    /// Only lines dated strictly before this date
    pub before: Option<NaiveDate>,
    /// Only lines dated within this inclusive range
    pub range: Option<(NaiveDate, NaiveDate)>,
}

impl EntryQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn for_account(account_id: AccountId) -> Self {
        Self {
            account_id: Some(account_id),
            ..Self::default()
        }
    }

    pub fn before(mut self, date: NaiveDate) -> Self {
        self.before = Some(date);
        self
    }

    pub fn between(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.range = Some((from, to));
        self
    }

    fn matches_date(&self, date: NaiveDate) -> bool {
        if let Some(before) = self.before {
            if date >= before {
                return false;
            }
        }
        if let Some((from, to)) = self.range {
            if date < from || date > to {
                return false;
            }
        }
        true
    }
}

/// One voucher line joined with its voucher header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRow {
    pub voucher_id: VoucherId,
    pub date: NaiveDate,
    pub description: String,
    /// Position of the line within its voucher
    pub line: usize,
    pub account_id: AccountId,
    pub debit: Money,
    pub credit: Money,
}

impl EntryRow {
    /// Debit minus credit
    pub fn net(&self) -> Money {
        self.debit - self.credit
    }
}

/// Repository for voucher persistence with an account index
pub struct VoucherRepository {
    path: PathBuf,
    /// Vouchers in ascending id order
    data: RwLock<Vec<Voucher>>,
    /// Index: account_id -> positions in `data` of vouchers touching it
    by_account: RwLock<HashMap<AccountId, Vec<usize>>>,
}

impl VoucherRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(Vec::new()),
            by_account: RwLock::new(HashMap::new()),
        }
    }

    /// Load vouchers from disk and build the account index
    pub fn load(&self) -> Result<(), BookError> {
        let mut file_data: VoucherData = read_json(&self.path)?;
        file_data.vouchers.sort_by_key(|v| v.id);

        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_account = self.by_account.write().map_err(lock_error)?;

        by_account.clear();
        for (pos, voucher) in file_data.vouchers.iter().enumerate() {
            index_voucher(&mut by_account, pos, voucher);
        }
        *data = file_data.vouchers;

        Ok(())
    }

    /// Save vouchers to disk
    pub fn save(&self) -> Result<(), BookError> {
        let data = self.data.read().map_err(lock_error)?;
        self.persist(&data)
    }

    fn persist(&self, vouchers: &[Voucher]) -> Result<(), BookError> {
        let file_data = VoucherData {
            vouchers: vouchers.to_vec(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Highest voucher id in the book, if any
    pub fn max_id(&self) -> Result<Option<VoucherId>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.last().map(|v| v.id))
    }

    /// Append a voucher with its lines under the next id and persist it
    ///
    /// Either the whole voucher lands on disk and in memory, or neither
    /// changes.
    pub fn create(
        &self,
        date: NaiveDate,
        description: &str,
        entries: Vec<Entry>,
    ) -> Result<Voucher, BookError> {
        let mut data = self.data.write().map_err(lock_error)?;
        let mut by_account = self.by_account.write().map_err(lock_error)?;

        let id = data
            .last()
            .map(|v| v.id.next())
            .unwrap_or_else(VoucherId::first);

        let voucher = Voucher::new(id, date, description, entries);
        data.push(voucher.clone());

        if let Err(e) = self.persist(&data) {
            data.pop();
            return Err(e);
        }

        index_voucher(&mut by_account, data.len() - 1, &voucher);
        Ok(voucher)
    }

    pub fn get(&self, id: VoucherId) -> Result<Option<Voucher>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data
            .binary_search_by_key(&id, |v| v.id)
            .ok()
            .map(|pos| data[pos].clone()))
    }

    /// All vouchers in ascending id order
    pub fn get_all(&self) -> Result<Vec<Voucher>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.clone())
    }

    /// The `limit` most recent vouchers, newest first
    pub fn recent(&self, limit: usize) -> Result<Vec<Voucher>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.iter().rev().take(limit).cloned().collect())
    }

    /// Lines matching the query, ordered by date, then voucher id, then line
    pub fn query_entries(&self, query: EntryQuery) -> Result<Vec<EntryRow>, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        let by_account = self.by_account.read().map_err(lock_error)?;

        let candidates: Box<dyn Iterator<Item = &Voucher> + '_> = match query.account_id {
            Some(account_id) => Box::new(
                by_account
                    .get(&account_id)
                    .map(|v| v.as_slice())
                    .unwrap_or(&[])
                    .iter()
                    .filter_map(|&pos| data.get(pos)),
            ),
            None => Box::new(data.iter()),
        };

        let account_filter = query.account_id;
        let mut rows: Vec<EntryRow> = candidates
            .filter(|v| query.matches_date(v.date))
            .flat_map(|v| {
                v.entries
                    .iter()
                    .enumerate()
                    .filter(move |(_, e)| account_filter.map_or(true, |id| e.account_id == id))
                    .map(move |(line, e)| EntryRow {
                        voucher_id: v.id,
                        date: v.date,
                        description: v.description.clone(),
                        line,
                        account_id: e.account_id,
                        debit: e.debit,
                        credit: e.credit,
                    })
            })
            .collect();

        rows.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then(a.voucher_id.cmp(&b.voucher_id))
                .then(a.line.cmp(&b.line))
        });
        Ok(rows)
    }

    pub fn count(&self) -> Result<usize, BookError> {
        let data = self.data.read().map_err(lock_error)?;
        Ok(data.len())
    }
}

fn index_voucher(by_account: &mut HashMap<AccountId, Vec<usize>>, pos: usize, voucher: &Voucher) {
    for entry in &voucher.entries {
        let positions = by_account.entry(entry.account_id).or_default();
        if positions.last() != Some(&pos) {
            positions.push(pos);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const CASH: AccountId = AccountId::new(3);
    const CAPITAL: AccountId = AccountId::new(6);

    fn create_test_repo() -> (TempDir, VoucherRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("vouchers.json");
        let repo = VoucherRepository::new(path);
        (temp_dir, repo)
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, d).unwrap()
    }

    fn pair(amount: i64) -> Vec<Entry> {
        vec![
            Entry::debit(CASH, Money::from_units(amount)),
            Entry::credit(CAPITAL, Money::from_units(amount)),
        ]
    }

    #[test]
    fn test_empty_load() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        assert_eq!(repo.count().unwrap(), 0);
        assert_eq!(repo.max_id().unwrap(), None);
    }

    #[test]
    fn test_create_assigns_gap_free_ids() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        let first = repo.create(day(1), "one", pair(10)).unwrap();
        let second = repo.create(day(2), "two", pair(20)).unwrap();

        assert_eq!(first.id, VoucherId::new(1));
        assert_eq!(second.id, VoucherId::new(2));
        assert_eq!(repo.max_id().unwrap(), Some(VoucherId::new(2)));
        assert_eq!(repo.get(second.id).unwrap().unwrap().description, "two");
        assert!(repo.get(VoucherId::new(9)).unwrap().is_none());
    }

    #[test]
    fn test_save_and_reload_rebuilds_index() {
        let (temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        repo.create(day(5), "opening", pair(100)).unwrap();

        let repo2 = VoucherRepository::new(temp_dir.path().join("vouchers.json"));
        repo2.load().unwrap();

        let rows = repo2.query_entries(EntryQuery::for_account(CASH)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].debit, Money::from_units(100));
    }

    #[test]
    fn test_query_orders_by_date_then_id() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.create(day(20), "late", pair(1)).unwrap();
        repo.create(day(10), "early", pair(2)).unwrap();
        repo.create(day(10), "early again", pair(3)).unwrap();

        let rows = repo.query_entries(EntryQuery::for_account(CASH)).unwrap();
        let ids: Vec<_> = rows.iter().map(|r| r.voucher_id.value()).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_query_before_and_between() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        for d in [1, 5, 10, 15, 31] {
            repo.create(day(d), "", pair(1)).unwrap();
        }

        let before = repo
            .query_entries(EntryQuery::for_account(CASH).before(day(10)))
            .unwrap();
        assert_eq!(before.len(), 2);

        let between = repo
            .query_entries(EntryQuery::for_account(CASH).between(day(10), day(31)))
            .unwrap();
        assert_eq!(between.len(), 3);

        let everything = repo.query_entries(EntryQuery::all()).unwrap();
        assert_eq!(everything.len(), 10);
    }

    #[test]
    fn test_query_same_account_twice_in_one_voucher() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();

        repo.create(
            day(1),
            "split",
            vec![
                Entry::debit(CASH, Money::from_units(30)),
                Entry::debit(CASH, Money::from_units(70)),
                Entry::credit(CAPITAL, Money::from_units(100)),
            ],
        )
        .unwrap();

        let rows = repo.query_entries(EntryQuery::for_account(CASH)).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 0);
        assert_eq!(rows[1].line, 1);
    }

    #[test]
    fn test_recent_is_newest_first() {
        let (_temp_dir, repo) = create_test_repo();
        repo.load().unwrap();
        for d in 1..=5 {
            repo.create(day(d), "", pair(1)).unwrap();
        }

        let recent: Vec<_> = repo
            .recent(3)
            .unwrap()
            .into_iter()
            .map(|v| v.id.value())
            .collect();
        assert_eq!(recent, vec![5, 4, 3]);
    }

    #[test]
    fn test_failed_write_rolls_back() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("blocker");
        std::fs::write(&blocker, "").unwrap();
        let repo = VoucherRepository::new(blocker.join("vouchers.json"));

        let result = repo.create(day(1), "lost", pair(10));
        assert!(matches!(result, Err(BookError::Storage(_))));
        assert_eq!(repo.count().unwrap(), 0);
        assert!(repo.query_entries(EntryQuery::all()).unwrap().is_empty());
    }
}
