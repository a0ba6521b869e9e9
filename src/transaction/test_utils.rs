use scraper::ElementRef;
use time::{
    Date,
    macros::{date, time},
};

use crate::{
    category::{Category, MainCategory},
    tag::TagName,
    transaction::TransactionFields,
};

/// A food expense on 2024-03-05 with no tags.
pub fn sample_fields(amount: f64) -> TransactionFields {
    fields_on(date!(2024 - 03 - 05), MainCategory::Food, "食材", amount, &[])
}

pub fn fields_on(
    date: Date,
    main: MainCategory,
    sub: &str,
    amount: f64,
    tags: &[&str],
) -> TransactionFields {
    TransactionFields {
        date,
        time: time!(12:00),
        category: Category::new(main, sub).unwrap(),
        amount,
        description: String::new(),
        tags: tags.iter().map(|tag| TagName::new(tag).unwrap()).collect(),
    }
}

#[track_caller]
pub fn assert_main_category_inputs(form: &ElementRef, checked: Option<&str>) {
    let selector = scraper::Selector::parse("input[type=radio][name=main_category]").unwrap();
    let inputs = form.select(&selector).collect::<Vec<_>>();
    assert_eq!(
        inputs.len(),
        MainCategory::ALL.len(),
        "want {} main category inputs, got {}",
        MainCategory::ALL.len(),
        inputs.len()
    );

    let checked_values = inputs
        .iter()
        .filter(|input| input.value().attr("checked").is_some())
        .filter_map(|input| input.value().attr("value"))
        .collect::<Vec<_>>();

    match checked {
        Some(checked) => assert_eq!(
            checked_values,
            vec![checked],
            "want {checked} to be the only checked main category, got {checked_values:?}"
        ),
        None => assert!(
            checked_values.is_empty(),
            "want no main category checked, got {checked_values:?}"
        ),
    }
}
