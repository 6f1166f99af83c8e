use async_trait::async_trait;

use crate::{
    Error,
    record::{Record, RecordId, SaleDate},
    seed::SeedProvider,
};

pub(crate) fn sample_record(
    id: i64,
    title: &str,
    price: f64,
    date_of_sale: &str,
    category: &str,
    sold: bool,
) -> Record {
    Record {
        id: RecordId::Number(id),
        title: title.to_owned(),
        description: format!("Description of {title}"),
        price,
        category: category.to_owned(),
        date_of_sale: SaleDate::new(date_of_sale),
        sold,
        image: None,
    }
}

/// Three years of records spread over every month, with a mix of prices,
/// categories and sold flags.
pub(crate) fn sample_records() -> Vec<Record> {
    const CATEGORIES: [&str; 4] = [
        "electronics",
        "jewelery",
        "men's clothing",
        "women's clothing",
    ];

    (0..36)
        .map(|i| {
            let month = i % 12 + 1;
            let year = 2021 + i / 12;
            let price = (i as f64 * 137.25) % 1_200.0;

            sample_record(
                i,
                &format!("Item {i}"),
                price,
                &format!("{year}-{month:02}-15T10:00:00+05:30"),
                CATEGORIES[i as usize % CATEGORIES.len()],
                i % 3 != 0,
            )
        })
        .collect()
}

/// A seed provider that returns a fixed set of records.
#[derive(Debug, Clone)]
pub(crate) struct StubSeedProvider {
    pub records: Vec<Record>,
}

#[async_trait]
impl SeedProvider for StubSeedProvider {
    async fn fetch(&self) -> Result<Vec<Record>, Error> {
        Ok(self.records.clone())
    }
}

/// A seed provider whose upstream is always unreachable.
#[derive(Debug, Clone)]
pub(crate) struct FailingSeedProvider;

#[async_trait]
impl SeedProvider for FailingSeedProvider {
    async fn fetch(&self) -> Result<Vec<Record>, Error> {
        Err(Error::SeedFetch("connection refused".to_owned()))
    }
}
