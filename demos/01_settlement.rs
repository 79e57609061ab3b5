/// settlement walkthrough - pay an invoice in full, then selectively
use chrono::{TimeZone, Utc};
use invoice_cycle_rs::{
    Account, CreditCard, InvoiceEngine, InvoiceKey, Money, SafeTimeProvider, TimeSource,
    Transaction, TransactionKind,
};

fn charge(id: &str, date: &str, amount: i64) -> Transaction {
    Transaction {
        id: id.to_string(),
        date: date.to_string(),
        amount: Money::from_major(amount),
        kind: TransactionKind::CreditCard,
        card_id: Some("visa".to_string()),
        account_id: None,
        category: None,
        description: format!("charge {id}"),
        is_paid: false,
        installment: None,
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let time = SafeTimeProvider::new(TimeSource::Test(
        Utc.with_ymd_and_hms(2024, 4, 5, 12, 0, 0).unwrap(),
    ));

    let card = CreditCard::new("visa", "Visa Gold", 25, 10)?.with_account("checking");
    let account = Account {
        id: "checking".to_string(),
        name: "Checking".to_string(),
    };
    let mut engine = InvoiceEngine::new(vec![card], vec![account]);

    let transactions = vec![
        charge("t1", "2024-02-20", 30), // old, still open: carried forward
        charge("t2", "2024-03-20", 100),
        charge("t3", "2024-03-21", 60),
    ];

    // full payment of the march invoice sweeps the carried february debt
    let march: InvoiceKey = "2024-03".parse()?;
    if let Some(settlement) = engine.pay_invoice(&transactions, "visa", march, None, &time)? {
        println!(
            "settled {} charges for {} via expense {}",
            settlement.settled_ids.len(),
            settlement.amount,
            settlement.expense.id
        );
        println!("{}", serde_json::to_string_pretty(&settlement.expense)?);
    }

    // selective settlement of a single charge instead
    let selected = vec!["t3".to_string()];
    if let Some(settlement) =
        engine.pay_invoice(&transactions, "visa", march, Some(&selected), &time)?
    {
        println!("selective settlement: {}", settlement.amount);
    }

    for event in engine.take_events() {
        println!("event: {event:?}");
    }

    Ok(())
}
