//! Train on synthetic data and advise a sample taxpayer.
//!
//! Run with: `cargo run --example advise`

use taxregime_rs::{
    better_regime, new_regime_tax, old_regime_tax, saving_tips, RegimeAdvisor, SyntheticDataset,
    TaxProfile,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut advisor = RegimeAdvisor::new();
    advisor.train_from(&SyntheticDataset::new().with_samples(200))?;

    let profile = TaxProfile {
        income: 1_000_000.0,
        deduction_80c: 150_000.0,
        deduction_80d: 25_000.0,
        hra: 0.0,
        age: 30,
        std_deduction: 50_000.0,
        total_deductions: 225_000.0,
    };

    let advice = advisor.advise(&profile)?;
    println!("Model says: {}", advice);

    let old = old_regime_tax(profile.taxable_income_old());
    let new = new_regime_tax(profile.income);
    println!(
        "Exact liability: old regime Rs. {:.0}, new regime Rs. {:.0}",
        old.total_tax, new.total_tax
    );

    let comparison = better_regime(&old, &new);
    println!(
        "Slab math agrees on: {} (saves Rs. {:.0})",
        comparison.regime, comparison.savings
    );

    println!("\nSaving tips:");
    for tip in saving_tips(&profile) {
        println!("  - {}", tip);
    }

    Ok(())
}
