/// invoice cycle walkthrough - aggregate charges, navigate months, derive status
use chrono::{TimeZone, Utc};
use invoice_cycle_rs::{
    Account, CreditCard, InvoiceEngine, Money, SafeTimeProvider, TimeSource, Transaction,
    TransactionKind,
};

fn charge(id: &str, date: &str, amount: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        amount: Money::from_raw_str(amount),
        kind: TransactionKind::CreditCard,
        card_id: Some("visa".to_string()),
        account_id: None,
        category: Some("groceries".to_string()),
        description: format!("charge {id}"),
        is_paid: false,
        installment: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap(),
    ));

    // card closes on the 25th, payment due the 10th of the next month
    let card = CreditCard::new("visa", "Visa Gold", 25, 10)?.with_account("checking");
    let account = Account {
        id: "checking".to_string(),
        name: "Checking".to_string(),
    };
    let engine = InvoiceEngine::new(vec![card], vec![account]);

    let transactions = vec![
        charge("t1", "2024-03-20", "100.00"), // before closing: bills to march
        charge("t2", "2024-03-28", "50.00"),  // after closing: bills to april
    ];

    // navigate from the current cycle back one month
    let current = engine.current_key(&time);
    for key in [current.prev(), current] {
        let view = engine.view(&transactions, "visa", key, &time)?;
        println!(
            "invoice {key}: total {} status {:?} (closed {}, due {})",
            view.invoice.total, view.status, view.closing_date, view.due_date
        );
    }

    let consolidated = engine.consolidated(&transactions, current, &time)?;
    println!(
        "all cards {}: open {} debt {}",
        consolidated.key, consolidated.open_total, consolidated.total_debt
    );

    Ok(())
}
