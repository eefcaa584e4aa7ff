mod common;

use common::{date, TestBook};
use ledgerbook::models::{AccountLevel, Entry, Money, VoucherId};
use ledgerbook::reports::{AccountSelector, LedgerReport, TrialBalanceReport, OPENING_BALANCE};
use ledgerbook::BookError;

#[test]
fn test_deposit_scenario() {
    let (book, chart) = TestBook::with_chart();

    book.post(date(2024, 1, 10), chart.cash, chart.capital, 100);

    let report = LedgerReport::generate(
        &book.storage,
        AccountSelector::Account(chart.cash),
        date(2024, 1, 1),
        date(2024, 1, 31),
    )
    .unwrap();

    let ledger = &report.ledgers[0];
    assert_eq!(ledger.opening_balance, Money::zero());
    assert_eq!(ledger.rows.len(), 2);

    let row = &ledger.rows[1];
    assert_eq!(row.voucher_id, Some(VoucherId::new(1)));
    assert_eq!(row.debit, Money::from_units(100));
    assert_eq!(row.credit, Money::zero());
    assert_eq!(row.balance, Money::from_units(100));
    assert_eq!(row.running_balance, Money::from_units(100));
}

#[test]
fn test_unbalanced_voucher_changes_nothing() {
    let (book, chart) = TestBook::with_chart();
    let vouchers = book.vouchers();
    let before = vouchers.next_id().unwrap();

    let result = vouchers.save_voucher(
        date(2024, 1, 10),
        "Short",
        vec![
            Entry::debit(chart.cash, Money::from_units(100)),
            Entry::credit(chart.capital, Money::from_units(90)),
        ],
    );

    assert!(matches!(result, Err(BookError::UnbalancedVoucher { .. })));
    assert_eq!(vouchers.next_id().unwrap(), before);
    assert_eq!(book.reopen().vouchers.count().unwrap(), 0);
}

#[test]
fn test_level_two_under_leaf_rejected() {
    let (book, chart) = TestBook::with_chart();

    let result = book.accounts().add_account("Odd", 2, Some(chart.cash));
    assert!(matches!(result, Err(BookError::Validation(_))));
    assert!(book.accounts().find("Odd").unwrap().is_none());
}

#[test]
fn test_empty_window_has_only_opening_row() {
    let (book, chart) = TestBook::with_chart();
    book.post(date(2024, 1, 10), chart.cash, chart.capital, 100);

    let report = LedgerReport::generate(
        &book.storage,
        AccountSelector::Account(chart.cash),
        date(2024, 6, 1),
        date(2024, 6, 30),
    )
    .unwrap();

    let rows = &report.ledgers[0].rows;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].description, OPENING_BALANCE);
    assert_eq!(rows[0].running_balance, report.ledgers[0].opening_balance);
    assert_eq!(rows[0].running_balance, Money::from_units(100));
}

#[test]
fn test_every_saved_voucher_is_balanced() {
    let (book, chart) = TestBook::with_chart();
    let vouchers = book.vouchers();

    book.post(date(2024, 1, 2), chart.cash, chart.capital, 500);
    vouchers
        .save_voucher(
            date(2024, 1, 3),
            "Split",
            vec![
                Entry::debit(chart.cash, Money::from_cents(1234)),
                Entry::debit(chart.bank, Money::from_cents(766)),
                Entry::new(chart.capital, Money::zero(), Money::zero()),
                Entry::credit(chart.capital, Money::from_units(20)),
            ],
        )
        .unwrap();
    let _ = vouchers.save_voucher(
        date(2024, 1, 4),
        "Rejected",
        vec![Entry::debit(chart.cash, Money::from_units(1))],
    );

    let storage = book.reopen();
    let saved = storage.vouchers.get_all().unwrap();
    assert_eq!(saved.len(), 2);
    for voucher in saved {
        assert_eq!(voucher.total_debit(), voucher.total_credit());
        assert!(voucher.total_debit().is_positive());
        assert!(voucher.entries.iter().all(|e| !e.is_blank()));
    }
}

#[test]
fn test_opening_balance_matches_full_history() {
    let (book, chart) = TestBook::with_chart();
    book.post(date(2024, 1, 5), chart.cash, chart.capital, 300);
    book.post(date(2024, 2, 7), chart.bank, chart.cash, 120);
    book.post(date(2024, 2, 7), chart.cash, chart.bank, 20);
    book.post(date(2024, 3, 1), chart.bank, chart.cash, 50);
    book.post(date(2024, 4, 9), chart.cash, chart.capital, 5);

    let full = LedgerReport::generate(
        &book.storage,
        AccountSelector::Account(chart.cash),
        date(2000, 1, 1),
        date(2030, 12, 31),
    )
    .unwrap();

    for cutoff in [
        date(2024, 1, 5),
        date(2024, 2, 8),
        date(2024, 3, 1),
        date(2024, 12, 1),
    ] {
        let expected = full.ledgers[0]
            .rows
            .iter()
            .filter(|r| r.date < cutoff)
            .last()
            .map(|r| r.running_balance)
            .unwrap_or_else(Money::zero);

        let windowed = LedgerReport::generate(
            &book.storage,
            AccountSelector::Account(chart.cash),
            cutoff,
            date(2030, 12, 31),
        )
        .unwrap();
        assert_eq!(windowed.ledgers[0].opening_balance, expected, "cutoff {}", cutoff);
    }
}

#[test]
fn test_running_balance_prefix_sum_for_all_accounts() {
    let (book, chart) = TestBook::with_chart();
    book.post(date(2024, 5, 1), chart.cash, chart.capital, 1000);
    book.post(date(2024, 5, 2), chart.bank, chart.cash, 400);
    book.post(date(2024, 5, 20), chart.cash, chart.bank, 75);
    book.post(date(2024, 6, 2), chart.bank, chart.cash, 10);

    let report = LedgerReport::generate(
        &book.storage,
        AccountSelector::All,
        date(2024, 5, 2),
        date(2024, 5, 31),
    )
    .unwrap();

    assert_eq!(report.ledgers.len(), 3);
    for ledger in &report.ledgers {
        assert_eq!(ledger.rows[0].running_balance, ledger.opening_balance);
        for pair in ledger.rows.windows(2) {
            assert_eq!(
                pair[1].running_balance,
                pair[0].running_balance + pair[1].balance
            );
            assert_eq!(pair[1].balance, pair[1].debit - pair[1].credit);
        }
    }

    let table = report.to_table();
    assert_eq!(table.columns[0], "account_name");
    assert_eq!(table.len(), report.rows().count());
}

#[test]
fn test_trial_balance_grand_totals_agree() {
    let (book, chart) = TestBook::with_chart();
    book.post(date(2024, 1, 1), chart.cash, chart.capital, 250);
    book.post(date(2024, 1, 15), chart.bank, chart.cash, 100);
    book.post(date(2024, 2, 1), chart.cash, chart.bank, 40);

    let report =
        TrialBalanceReport::generate(&book.storage, date(2024, 1, 1), date(2024, 12, 31)).unwrap();

    assert_eq!(report.total_debit, report.total_credit);
    assert_eq!(report.total_debit, Money::from_units(390));

    let names: Vec<_> = report.rows.iter().map(|r| r.account_name.as_str()).collect();
    assert_eq!(names, vec!["Cash", "Bank", "Capital"]);

    let january =
        TrialBalanceReport::generate(&book.storage, date(2024, 1, 10), date(2024, 1, 31)).unwrap();
    assert_eq!(january.rows.len(), 2);
    assert!(january.is_balanced());
}

#[test]
fn test_reversed_ranges_rejected() {
    let (book, _) = TestBook::with_chart();

    let ledger = LedgerReport::generate(
        &book.storage,
        AccountSelector::All,
        date(2024, 2, 1),
        date(2024, 1, 1),
    );
    assert!(matches!(ledger, Err(BookError::InvalidDateRange { .. })));

    let tb = TrialBalanceReport::generate(&book.storage, date(2024, 2, 1), date(2024, 1, 1));
    assert!(matches!(tb, Err(BookError::InvalidDateRange { .. })));
}

#[test]
fn test_book_survives_reload() {
    let (book, chart) = TestBook::with_chart();
    book.post(date(2024, 1, 10), chart.cash, chart.capital, 100);

    let storage = book.reopen();
    assert_eq!(storage.accounts.count().unwrap(), 7);
    assert_eq!(
        storage.accounts.query(Some(AccountLevel::Leaf)).unwrap().len(),
        3
    );
    assert_eq!(storage.vouchers.max_id().unwrap(), Some(VoucherId::new(1)));

    let level_two = storage.accounts.get(chart.current).unwrap().unwrap();
    assert_eq!(level_two.parent_id, Some(chart.assets));
}

#[test]
fn test_failed_write_leaves_book_unchanged() {
    let (book, chart) = TestBook::with_chart();

    // A directory where the voucher file should be makes the final rename fail
    let vouchers_file = book.storage.paths().vouchers_file();
    std::fs::create_dir_all(vouchers_file.join("blocked")).unwrap();

    let vouchers = book.vouchers();
    let result = vouchers.save_voucher(
        date(2024, 1, 10),
        "Never lands",
        vec![
            Entry::debit(chart.cash, Money::from_units(10)),
            Entry::credit(chart.capital, Money::from_units(10)),
        ],
    );

    assert!(matches!(result, Err(BookError::Storage(_))));
    assert_eq!(vouchers.count().unwrap(), 0);
    assert_eq!(vouchers.next_id().unwrap(), VoucherId::new(1));
}

#[test]
fn test_report_totals_that_overflow_are_rejected() {
    let (book, chart) = TestBook::with_chart();
    let vouchers = book.vouchers();
    let largest = Money::from_cents(i64::MAX);

    for day in [10, 11] {
        vouchers
            .save_voucher(
                date(2024, 1, day),
                "Largest",
                vec![
                    Entry::debit(chart.cash, largest),
                    Entry::credit(chart.capital, largest),
                ],
            )
            .unwrap();
    }

    let ledger = LedgerReport::generate(
        &book.storage,
        AccountSelector::Account(chart.cash),
        date(2024, 1, 1),
        date(2024, 1, 31),
    );
    assert!(ledger.unwrap_err().is_validation());

    let opening = LedgerReport::generate(
        &book.storage,
        AccountSelector::Account(chart.cash),
        date(2024, 2, 1),
        date(2024, 2, 28),
    );
    assert!(opening.unwrap_err().is_validation());

    let tb = TrialBalanceReport::generate(&book.storage, date(2024, 1, 1), date(2024, 1, 31));
    assert!(tb.unwrap_err().is_validation());

    // One voucher alone still reports
    let single = LedgerReport::generate(
        &book.storage,
        AccountSelector::Account(chart.cash),
        date(2024, 1, 10),
        date(2024, 1, 10),
    )
    .unwrap();
    assert_eq!(single.ledgers[0].closing_balance, largest);
}

#[test]
fn test_currency_prefixed_negative_is_rejected() {
    let (book, chart) = TestBook::with_chart();
    let amount = Money::parse("$-5").unwrap();
    assert!(amount.is_negative());

    let result = book.vouchers().save_voucher(
        date(2024, 1, 10),
        "Sign flip",
        vec![
            Entry::debit(chart.cash, amount),
            Entry::credit(chart.capital, amount),
        ],
    );
    assert!(result.unwrap_err().is_validation());
}
