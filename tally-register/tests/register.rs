use tally_db::Ledger;
use tally_model::{
    Payee, SplitLine, TransactionKind, TransactionStatus, ATTACHMENT_REF_TRANSACTION,
    AttachmentLink,
};
use tally_register::{
    build_rows, delete_matching, delete_viewed, mark_rows, mark_viewed, paste_transaction,
    RegisterFilter, SortColumn, ViewSettings,
};

fn ledger() -> Ledger {
    let ledger = Ledger::open_memory().unwrap();
    assert!(ledger.ensure_schema());
    ledger
}

fn add_account(ledger: &mut Ledger, name: &str, initial: f64) -> i64 {
    let account = ledger.accounts.create();
    {
        let mut a = account.borrow_mut();
        a.name = name.to_string();
        a.initial_balance = initial;
    }
    assert!(ledger.accounts.save(&account));
    account.borrow().id
}

fn add_payee(ledger: &mut Ledger, name: &str) -> i64 {
    let mut payee = Payee {
        name: name.to_string(),
        ..Payee::default()
    };
    assert!(ledger.payees.save_value(&mut payee));
    payee.id
}

fn add_txn(
    ledger: &mut Ledger,
    account_id: i64,
    payee_id: i64,
    kind: TransactionKind,
    amount: f64,
    date: &str,
) -> i64 {
    let txn = ledger.transactions.create();
    {
        let mut t = txn.borrow_mut();
        t.account_id = account_id;
        t.payee_id = payee_id;
        t.kind = kind;
        t.amount = amount;
        t.date = date.to_string();
    }
    assert!(ledger.transactions.save(&txn));
    txn.borrow().id
}

#[test]
fn running_balance_accumulates_in_date_order() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 50.0);
    let payee = add_payee(&mut ledger, "Acme");

    add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 30.0, "2024-01-20");
    add_txn(&mut ledger, account, payee, TransactionKind::Deposit, 100.0, "2024-01-10");

    let filter = RegisterFilter {
        account_id: Some(account),
        ..RegisterFilter::default()
    };
    let rows = build_rows(&ledger, &filter);

    assert_eq!(rows.len(), 2);
    // snapshot comes back date-ordered regardless of insertion order
    assert_eq!(rows[0].txn.date, "2024-01-10");
    assert_eq!(rows[0].amount, 100.0);
    assert_eq!(rows[0].balance, 150.0);
    assert_eq!(rows[1].amount, -30.0);
    assert_eq!(rows[1].balance, 120.0);
}

#[test]
fn transfers_show_the_counterparty_account_on_each_leg() {
    let mut ledger = ledger();
    let checking = add_account(&mut ledger, "Checking", 0.0);
    let savings = add_account(&mut ledger, "Savings", 0.0);

    let txn = ledger.transactions.create();
    {
        let mut t = txn.borrow_mut();
        t.account_id = checking;
        t.to_account_id = savings;
        t.kind = TransactionKind::Transfer;
        t.amount = 40.0;
        t.to_amount = 40.0;
        t.payee_id = -1;
        t.date = "2024-03-01".to_string();
    }
    assert!(ledger.transactions.save(&txn));

    let from_view = build_rows(
        &ledger,
        &RegisterFilter {
            account_id: Some(checking),
            ..RegisterFilter::default()
        },
    );
    assert_eq!(from_view[0].amount, -40.0);
    assert_eq!(from_view[0].payee_name, "> Savings");

    let to_view = build_rows(
        &ledger,
        &RegisterFilter {
            account_id: Some(savings),
            ..RegisterFilter::default()
        },
    );
    assert_eq!(to_view[0].amount, 40.0);
    assert_eq!(to_view[0].payee_name, "< Checking");
}

#[test]
fn category_display_prefers_split_marker() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Store");

    let category = ledger.categories.create();
    category.borrow_mut().name = "Food".to_string();
    assert!(ledger.categories.save(&category));
    let subcategory = ledger.subcategories.create();
    {
        let mut s = subcategory.borrow_mut();
        s.category_id = category.borrow().id;
        s.name = "Groceries".to_string();
    }
    assert!(ledger.subcategories.save(&subcategory));

    let plain = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 10.0, "2024-01-01");
    {
        let handle = ledger.transactions.get(plain).unwrap();
        handle.borrow_mut().category_id = category.borrow().id;
        handle.borrow_mut().subcategory_id = subcategory.borrow().id;
        assert!(ledger.transactions.save(&handle));
    }

    let split_txn = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 25.0, "2024-01-02");
    let mut split = SplitLine {
        trans_id: split_txn,
        category_id: category.borrow().id,
        amount: 25.0,
        ..SplitLine::default()
    };
    assert!(ledger.splits.save_value(&mut split));

    let rows = build_rows(&ledger, &RegisterFilter::default());
    assert_eq!(rows[0].category_name, "Food:Groceries");
    assert_eq!(rows[1].category_name, "Split");
}

#[test]
fn text_filter_narrows_the_view() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let grocer = add_payee(&mut ledger, "Corner Grocer");
    let garage = add_payee(&mut ledger, "Garage");

    add_txn(&mut ledger, account, grocer, TransactionKind::Withdrawal, 12.0, "2024-01-01");
    add_txn(&mut ledger, account, garage, TransactionKind::Withdrawal, 80.0, "2024-01-02");

    let rows = build_rows(
        &ledger,
        &RegisterFilter {
            text: Some("grocer".to_string()),
            ..RegisterFilter::default()
        },
    );
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].payee_name, "Corner Grocer");
}

#[test]
fn withdrawal_and_deposit_cells_are_mutually_exclusive() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Acme");
    add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 19.5, "2024-01-01");

    let rows = build_rows(&ledger, &RegisterFilter::default());
    assert_eq!(rows[0].cell(SortColumn::Withdrawal), "19.50");
    assert_eq!(rows[0].cell(SortColumn::Deposit), "");
    assert_eq!(rows[0].cell(SortColumn::Balance), "-19.50");
}

#[test]
fn mark_rows_updates_store_and_cached_handles() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Acme");
    let id = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 100.0, "2024-01-01");

    let handle = ledger.transactions.get(id).unwrap();
    assert_eq!(handle.borrow().status, TransactionStatus::None);

    let mut rows = build_rows(&ledger, &RegisterFilter::default());
    assert!(mark_rows(&mut ledger, &mut rows, &[0], TransactionStatus::Reconciled));

    // write-through: the previously obtained handle sees the change
    assert_eq!(handle.borrow().status, TransactionStatus::Reconciled);

    let refreshed = build_rows(&ledger, &RegisterFilter::default());
    assert_eq!(refreshed[0].txn.status, TransactionStatus::Reconciled);
}

#[test]
fn mark_viewed_touches_every_row() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Acme");
    for day in ["2024-01-01", "2024-01-02", "2024-01-03"] {
        add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 5.0, day);
    }

    let mut rows = build_rows(&ledger, &RegisterFilter::default());
    assert!(mark_viewed(&mut ledger, &mut rows, TransactionStatus::Void));

    let refreshed = build_rows(&ledger, &RegisterFilter::default());
    assert!(refreshed
        .iter()
        .all(|r| r.txn.status == TransactionStatus::Void));
}

#[test]
fn delete_viewed_respects_the_filter() {
    let mut ledger = ledger();
    let checking = add_account(&mut ledger, "Checking", 0.0);
    let savings = add_account(&mut ledger, "Savings", 0.0);
    let payee = add_payee(&mut ledger, "Acme");

    add_txn(&mut ledger, checking, payee, TransactionKind::Withdrawal, 5.0, "2024-01-01");
    let kept = add_txn(&mut ledger, savings, payee, TransactionKind::Withdrawal, 7.0, "2024-01-02");

    let viewed = build_rows(
        &ledger,
        &RegisterFilter {
            account_id: Some(checking),
            ..RegisterFilter::default()
        },
    );
    assert!(delete_viewed(&mut ledger, &viewed));

    let remaining = ledger.transactions.all(None, true);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept);
}

#[test]
fn delete_matching_removes_only_the_flagged_status() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Acme");

    let flagged = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 5.0, "2024-01-01");
    {
        let handle = ledger.transactions.get(flagged).unwrap();
        handle.borrow_mut().status = TransactionStatus::FollowUp;
        assert!(ledger.transactions.save(&handle));
    }
    let kept = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 7.0, "2024-01-02");

    let rows = build_rows(&ledger, &RegisterFilter::default());
    assert!(delete_matching(&mut ledger, &rows, TransactionStatus::FollowUp));

    let remaining = ledger.transactions.all(None, true);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, kept);
}

#[test]
fn delete_viewed_cascades_dependents() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Acme");
    let id = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 30.0, "2024-01-01");

    let mut split = SplitLine {
        trans_id: id,
        amount: 30.0,
        ..SplitLine::default()
    };
    assert!(ledger.splits.save_value(&mut split));
    let mut link = AttachmentLink {
        ref_type: ATTACHMENT_REF_TRANSACTION.to_string(),
        ref_id: id,
        filename: "receipt.pdf".to_string(),
        ..AttachmentLink::default()
    };
    assert!(ledger.attachments.save_value(&mut link));

    let rows = build_rows(&ledger, &RegisterFilter::default());
    assert!(delete_viewed(&mut ledger, &rows));

    assert!(ledger.splits.all(None, true).is_empty());
    assert!(ledger.attachments.all(None, true).is_empty());
}

#[test]
fn paste_can_keep_the_original_date() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Acme");
    let id = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 15.0, "2023-11-11");

    let settings = ViewSettings {
        paste_keeps_date: true,
        ..ViewSettings::default()
    };
    let new_id = paste_transaction(&mut ledger, id, &settings).unwrap();
    assert_ne!(new_id, id);
    assert_eq!(
        ledger.transactions.get(new_id).unwrap().borrow().date,
        "2023-11-11"
    );
}

/// The end-to-end scenario: create, save, bulk-mark reconciled under a
/// savepoint, observe through `get`, then remove.
#[test]
fn create_mark_and_remove_lifecycle() {
    let mut ledger = ledger();
    let account = add_account(&mut ledger, "Checking", 0.0);
    let payee = add_payee(&mut ledger, "Acme");
    let id = add_txn(&mut ledger, account, payee, TransactionKind::Withdrawal, 100.0, "2024-04-01");
    assert!(id > 0);

    let mut rows = build_rows(&ledger, &RegisterFilter::default());
    assert!(mark_rows(&mut ledger, &mut rows, &[0], TransactionStatus::Reconciled));
    assert_eq!(
        ledger.transactions.get(id).unwrap().borrow().status,
        TransactionStatus::Reconciled
    );

    assert!(ledger.remove_transaction(id));
    assert!(ledger.transactions.get(id).is_none());
}
