//! The fields shared by the new and edit transaction forms, and the
//! conversion from submitted form data to [TransactionFields].

use axum::{
    extract::Query,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;
use time::{Date, Time, macros::format_description};

use crate::{
    Error,
    category::{Category, MainCategory},
    endpoints,
    html::{FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE},
    tag::{COMMON_TAGS, TagName, Tags},
    transaction::TransactionFields,
};

/// The form data for creating or editing a transaction.
///
/// Every field is optional so that an incomplete form can be answered with an
/// alert instead of a rejected request.
#[derive(Debug, Default, Deserialize)]
pub struct TransactionForm {
    pub date: Option<String>,
    pub time: Option<String>,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub main_category: Option<String>,
    pub sub_category: Option<String>,
    /// The checked tag checkboxes.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Extra tags typed by the user, separated by commas.
    pub custom_tags: Option<String>,
}

impl TransactionForm {
    /// Validate the submitted form.
    ///
    /// The amount and category are checked first so that an incomplete form
    /// is reported as such.
    ///
    /// # Errors
    /// Returns [Error::MissingField] for an empty required field,
    /// [Error::InvalidAmount] for an amount that is not a non-negative number,
    /// a category error for an unknown or mismatched category and
    /// [Error::InvalidDateTime] for a malformed date or time.
    pub fn into_fields(self) -> Result<TransactionFields, Error> {
        let amount = parse_amount(required(self.amount.as_deref(), "amount")?)?;
        let main: MainCategory = required(self.main_category.as_deref(), "main_category")?.parse()?;
        let category = Category::new(main, required(self.sub_category.as_deref(), "sub_category")?)?;
        let date = parse_date(required(self.date.as_deref(), "date")?)?;
        let time = parse_time(required(self.time.as_deref(), "time")?)?;

        let mut tags = Tags::new();
        let custom_tags = self.custom_tags.unwrap_or_default();
        let names = self
            .tags
            .iter()
            .map(String::as_str)
            .chain(custom_tags.split([',', '，']))
            .filter(|name| !name.trim().is_empty());

        for name in names {
            tags.insert(TagName::new(name)?);
        }

        Ok(TransactionFields {
            date,
            time,
            category,
            amount,
            description: self.description.unwrap_or_default().trim().to_owned(),
            tags,
        })
    }
}

fn required<'a>(value: Option<&'a str>, field: &'static str) -> Result<&'a str, Error> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::MissingField(field)),
    }
}

fn parse_amount(text: &str) -> Result<f64, Error> {
    match text.parse::<f64>() {
        Ok(amount) if amount.is_finite() && amount >= 0.0 => Ok(amount),
        _ => Err(Error::InvalidAmount(text.to_owned())),
    }
}

fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text, format_description!("[year]-[month]-[day]"))
        .map_err(|_| Error::InvalidDateTime(text.to_owned()))
}

/// Parse `HH:MM`, or `HH:MM:SS` as some browsers send, dropping the seconds.
fn parse_time(text: &str) -> Result<Time, Error> {
    Time::parse(text, format_description!("[hour]:[minute]"))
        .or_else(|_| Time::parse(text, format_description!("[hour]:[minute]:[second]")))
        .map(|time| Time::from_hms(time.hour(), time.minute(), 0).unwrap_or(time))
        .map_err(|_| Error::InvalidDateTime(text.to_owned()))
}

/// The values a transaction form starts with.
pub struct TransactionFormDefaults<'a> {
    pub date: Date,
    pub time: Time,
    pub amount: Option<f64>,
    pub description: &'a str,
    pub category: Option<Category>,
    pub tags: &'a Tags,
}

pub fn transaction_form_fields(defaults: &TransactionFormDefaults<'_>) -> Markup {
    let main = defaults.category.map(|category| category.main());
    let sub = defaults.category.map(|category| category.sub());
    let custom_tags: Vec<&str> = defaults
        .tags
        .iter()
        .map(AsRef::as_ref)
        .filter(|tag| !COMMON_TAGS.contains(tag))
        .collect();

    html! {
        div class="grid grid-cols-2 gap-3"
        {
            div
            {
                label for="date" class=(FORM_LABEL_STYLE) { "日期" }
                input
                    name="date"
                    id="date"
                    type="date"
                    value=(defaults.date)
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            div
            {
                label for="time" class=(FORM_LABEL_STYLE) { "時間" }
                input
                    name="time"
                    id="time"
                    type="time"
                    value=(format!("{:02}:{:02}", defaults.time.hour(), defaults.time.minute()))
                    required
                    class=(FORM_TEXT_INPUT_STYLE);
            }
        }

        div
        {
            label for="amount" class=(FORM_LABEL_STYLE) { "金額" }
            input
                name="amount"
                id="amount"
                type="number"
                inputmode="decimal"
                step="any"
                min="0"
                placeholder="0"
                value=[defaults.amount]
                required
                autofocus[defaults.amount.is_none()]
                class={ (FORM_TEXT_INPUT_STYLE) " text-2xl font-black" };
        }

        div
        {
            label for="description" class=(FORM_LABEL_STYLE) { "帳務說明" }
            input
                name="description"
                id="description"
                type="text"
                placeholder="例如：全聯買菜"
                value=(defaults.description)
                class=(FORM_TEXT_INPUT_STYLE);
        }

        fieldset
        {
            legend class=(FORM_LABEL_STYLE) { "主分類" }

            div class="grid grid-cols-4 gap-2"
            {
                @for category in MainCategory::ALL {
                    label class="main-category-option cursor-pointer"
                    {
                        input
                            type="radio"
                            name="main_category"
                            value=(category.label())
                            checked[main == Some(category)]
                            class="peer sr-only"
                            hx-get=(endpoints::SUB_CATEGORY_PICKER)
                            hx-target="#sub-category-picker"
                            hx-swap="outerHTML"
                            hx-trigger="change";

                        span
                            class="flex items-center justify-center h-12 rounded-2xl text-white
                            font-black text-lg opacity-60 peer-checked:opacity-100
                            peer-checked:ring-4 peer-checked:ring-slate-300"
                            style={ "background-color: " (category.color()) }
                        {
                            (category.label())
                        }
                    }
                }
            }
        }

        (sub_category_picker(main, sub))

        fieldset
        {
            legend class=(FORM_LABEL_STYLE) { "標籤" }

            div class="flex flex-wrap gap-2 mb-3"
            {
                @for tag in COMMON_TAGS.iter().copied().chain(custom_tags.iter().copied()) {
                    (tag_checkbox(tag, defaults.tags.contains(tag)))
                }
            }

            input
                name="custom_tags"
                id="custom_tags"
                type="text"
                placeholder="新增自訂標籤"
                aria-label="新增自訂標籤"
                class=(FORM_TEXT_INPUT_STYLE);
        }
    }
}

fn tag_checkbox(tag: &str, checked: bool) -> Markup {
    html! {
        label class="cursor-pointer"
        {
            input type="checkbox" name="tags" value=(tag) checked[checked] class="peer sr-only";
            span
                class="block px-3 py-1.5 rounded-xl text-xs font-bold border border-slate-200
                text-slate-500 bg-white peer-checked:bg-[#373e4b] peer-checked:text-white
                peer-checked:border-[#373e4b]"
            {
                "#" (tag)
            }
        }
    }
}

/// The sub category radios for `main`, with `selected` checked.
///
/// Without a main category the picker only shows a hint.
fn sub_category_picker(main: Option<MainCategory>, selected: Option<&str>) -> Markup {
    html! {
        fieldset id="sub-category-picker"
        {
            legend class=(FORM_LABEL_STYLE) { "子分類" }

            @match main {
                Some(main) => {
                    div class="flex flex-wrap gap-2"
                    {
                        @for sub in main.sub_categories() {
                            label class="cursor-pointer"
                            {
                                input
                                    type="radio"
                                    name="sub_category"
                                    value=(sub)
                                    checked[selected == Some(*sub)]
                                    required
                                    class="peer sr-only";
                                span
                                    class="block px-3 py-2 rounded-xl text-sm font-bold
                                    bg-slate-50 text-slate-600 border border-slate-200
                                    peer-checked:text-white"
                                    style={ "--category-color: " (main.color()) }
                                {
                                    (sub)
                                }
                            }
                        }
                    }
                }
                None => {
                    p class="text-sm text-slate-400" { "請先選擇主分類" }
                }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct SubCategoryQuery {
    pub main_category: Option<String>,
}

/// Renders the sub category picker for the main category in the query.
pub async fn get_sub_category_picker(Query(query): Query<SubCategoryQuery>) -> Response {
    let main = match query.main_category.as_deref().map(str::trim) {
        Some(label) if !label.is_empty() => match label.parse::<MainCategory>() {
            Ok(main) => Some(main),
            Err(error) => return error.into_alert_response(),
        },
        _ => None,
    };

    sub_category_picker(main, None).into_response()
}

#[cfg(test)]
mod tests {
    use axum::{extract::Query, http::StatusCode};
    use scraper::{Html, Selector};
    use time::macros::{date, time};

    use crate::{
        Error,
        category::{Category, MainCategory},
        tag::{COMMON_TAGS, TagName, Tags},
        test_utils::{assert_status_ok, must_get_form, parse_html_fragment},
        transaction::{
            form::{
                SubCategoryQuery, TransactionForm, TransactionFormDefaults,
                get_sub_category_picker, transaction_form_fields,
            },
            test_utils::assert_main_category_inputs,
        },
    };

    fn complete_form() -> TransactionForm {
        TransactionForm {
            date: Some("2024-03-05".to_owned()),
            time: Some("12:30".to_owned()),
            amount: Some("500".to_owned()),
            description: Some(" 午餐 ".to_owned()),
            main_category: Some("食".to_owned()),
            sub_category: Some("三餐外食".to_owned()),
            tags: vec!["朱".to_owned(), "午餐".to_owned()],
            custom_tags: None,
        }
    }

    fn render(defaults: &TransactionFormDefaults<'_>) -> Html {
        let markup = maud::html! { form { (transaction_form_fields(defaults)) } };
        Html::parse_fragment(&markup.into_string())
    }

    fn checked_values(document: &Html, name: &str) -> Vec<String> {
        let selector = Selector::parse(&format!("input[name={name}][checked]")).unwrap();
        document
            .select(&selector)
            .filter_map(|input| input.value().attr("value"))
            .map(str::to_owned)
            .collect()
    }

    #[test]
    fn complete_form_is_accepted() {
        let fields = complete_form().into_fields().unwrap();

        assert_eq!(fields.date, date!(2024 - 03 - 05));
        assert_eq!(fields.time, time!(12:30));
        assert_eq!(fields.amount, 500.0);
        assert_eq!(fields.description, "午餐");
        assert_eq!(
            fields.category,
            Category::new(MainCategory::Food, "三餐外食").unwrap()
        );
        assert_eq!(
            fields.tags,
            Tags::from(vec![TagName::new("朱").unwrap(), TagName::new("午餐").unwrap()])
        );
    }

    #[test]
    fn missing_amount_or_category_is_rejected() {
        let form = TransactionForm {
            amount: Some(" ".to_owned()),
            ..complete_form()
        };
        assert_eq!(form.into_fields(), Err(Error::MissingField("amount")));

        let form = TransactionForm {
            main_category: None,
            ..complete_form()
        };
        assert_eq!(form.into_fields(), Err(Error::MissingField("main_category")));

        let form = TransactionForm {
            sub_category: Some(String::new()),
            ..complete_form()
        };
        assert_eq!(form.into_fields(), Err(Error::MissingField("sub_category")));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let form = TransactionForm {
            amount: Some("-5".to_owned()),
            ..complete_form()
        };

        assert_eq!(form.into_fields(), Err(Error::InvalidAmount("-5".to_owned())));
    }

    #[test]
    fn sub_category_must_match_main_category() {
        let form = TransactionForm {
            sub_category: Some("薪水".to_owned()),
            ..complete_form()
        };

        assert!(matches!(
            form.into_fields(),
            Err(Error::InvalidSubCategory { .. })
        ));
    }

    #[test]
    fn malformed_time_is_rejected() {
        let form = TransactionForm {
            time: Some("noon".to_owned()),
            ..complete_form()
        };

        assert_eq!(form.into_fields(), Err(Error::InvalidDateTime("noon".to_owned())));
    }

    #[test]
    fn time_with_seconds_drops_seconds() {
        let form = TransactionForm {
            time: Some("08:05:59".to_owned()),
            ..complete_form()
        };

        assert_eq!(form.into_fields().unwrap().time, time!(08:05));
    }

    #[test]
    fn custom_tags_are_split_and_deduplicated() {
        let form = TransactionForm {
            custom_tags: Some("全聯, 朱 ,，新店".to_owned()),
            ..complete_form()
        };

        let tags = form.into_fields().unwrap().tags;

        let names: Vec<&str> = tags.iter().map(AsRef::as_ref).collect();
        assert_eq!(names, vec!["朱", "午餐", "全聯", "新店"]);
    }

    #[test]
    fn new_form_has_nothing_checked() {
        let tags = Tags::new();
        let document = render(&TransactionFormDefaults {
            date: date!(2024 - 03 - 05),
            time: time!(08:05),
            amount: None,
            description: "",
            category: None,
            tags: &tags,
        });

        let form = must_get_form(&document);
        assert_main_category_inputs(&form, None);
        assert!(checked_values(&document, "tags").is_empty());
        assert!(document.html().contains("請先選擇主分類"));

        let selector = Selector::parse("input[name=time]").unwrap();
        let time_input = document.select(&selector).next().unwrap();
        assert_eq!(time_input.value().attr("value"), Some("08:05"));

        let selector = Selector::parse("input[name=tags]").unwrap();
        assert_eq!(document.select(&selector).count(), COMMON_TAGS.len());
    }

    #[test]
    fn edit_form_checks_category_and_tags() {
        let tags = Tags::from(vec![TagName::new("羅").unwrap(), TagName::new("夜市").unwrap()]);
        let document = render(&TransactionFormDefaults {
            date: date!(2024 - 03 - 05),
            time: time!(19:00),
            amount: Some(120.0),
            description: "小吃",
            category: Some(Category::new(MainCategory::Food, "三餐外食").unwrap()),
            tags: &tags,
        });

        let form = must_get_form(&document);
        assert_main_category_inputs(&form, Some("食"));
        assert_eq!(checked_values(&document, "sub_category"), vec!["三餐外食"]);
        assert_eq!(checked_values(&document, "tags"), vec!["羅", "夜市"]);

        let selector = Selector::parse("input[name=sub_category]").unwrap();
        assert_eq!(
            document.select(&selector).count(),
            MainCategory::Food.sub_categories().len()
        );
    }

    #[tokio::test]
    async fn picker_lists_sub_categories_of_main_category() {
        let query = Query(SubCategoryQuery {
            main_category: Some("收".to_owned()),
        });

        let response = get_sub_category_picker(query).await;

        assert_status_ok(&response);
        let document = parse_html_fragment(response).await;
        let selector = Selector::parse("input[name=sub_category]").unwrap();
        let values: Vec<_> = document
            .select(&selector)
            .filter_map(|input| input.value().attr("value"))
            .collect();
        assert_eq!(values, MainCategory::Income.sub_categories());
    }

    #[tokio::test]
    async fn picker_rejects_unknown_main_category() {
        let query = Query(SubCategoryQuery {
            main_category: Some("錢".to_owned()),
        });

        let response = get_sub_category_picker(query).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
