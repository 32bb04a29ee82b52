use anyhow::Result;
use contact_pipeline::models::{SourceOption, StakeholderOption};
use contact_pipeline::processor::{
    AliasResolver, FinalDatasetBuilder, FinalDatasetOptions, RuleNormalizer,
};
use contact_pipeline::pipeline::drop_duplicate_rows;
use polars::prelude::*;

fn main() -> Result<()> {
    println!("=== TESTING CONTACT CLEANING ===\n");

    // Raw export with form-style headers and messy values
    let mut df = DataFrame::new(vec![
        Series::new(
            "Name of the Teacher".into(),
            vec!["  asha ramesh PATIL ", "Ravi kumar", "  asha ramesh PATIL ", "meera"],
        )
        .into(),
        Series::new(
            "Mobile/Contact Number".into(),
            vec!["+91 98765 43210", "12345", "+91 98765 43210", "919123456780"],
        )
        .into(),
        Series::new(
            "Email Address".into(),
            vec!["Asha@Mail.COM", "ravi(at)mail", "Asha@Mail.COM", ""],
        )
        .into(),
        Series::new(
            "Name of the School".into(),
            vec![
                "Z.P.H.S. No 5 Satara",
                "St Xaviers High School (CBSE) Mumbai",
                "Z.P.H.S. No 5 Satara",
                "Kendriya Vidya Mandir, Pune",
            ],
        )
        .into(),
        Series::new(
            "City".into(),
            vec!["Satara", "bombay", "Satara", "Navi Mumbai - 400614"],
        )
        .into(),
        Series::new(
            "State".into(),
            vec!["maharastra", "MAHARASHTRA", "maharastra", "mahashttra"],
        )
        .into(),
        Series::new(
            "Timestamp".into(),
            vec!["15/03/2023", "3/15/2023 10:22:33", "15/03/2023", "Nov 5, 2023"],
        )
        .into(),
    ])?;

    println!("1. Raw input:");
    println!("{}", df);

    let resolver = AliasResolver::default();
    let bindings = resolver.map_to_canonical_schema(&mut df)?;

    println!("\n2. After alias resolution ({} columns mapped):", bindings.len());
    for binding in &bindings {
        println!("   {} -> {}", binding.header, binding.field);
    }

    RuleNormalizer::default().normalize_dataframe(&mut df)?;

    println!("\n3. After normalization:");
    println!("{}", df);

    let clean = drop_duplicate_rows(&df)?;
    println!(
        "\n4. After deduplication: {} -> {} rows",
        df.height(),
        clean.height()
    );

    let options = FinalDatasetOptions {
        source: Some(SourceOption::Event),
        stakeholder: Some(StakeholderOption::Teacher),
        ..Default::default()
    };
    let final_df = FinalDatasetBuilder::new(options).build(&clean)?;

    println!("\n5. Final dataset:");
    println!("{}", final_df);

    if let Ok(schools) = final_df.column("Institute Name").and_then(|c| c.str().cloned()) {
        println!("\n✅ Standardized institute names:");
        for (i, school) in schools.into_iter().enumerate() {
            if let Some(school) = school {
                println!("   Row {}: \"{}\"", i + 1, school);
            }
        }
    }

    Ok(())
}
