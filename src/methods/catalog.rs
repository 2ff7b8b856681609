use crate::model::Car;

/// The category value the storefront filter uses to mean "no filter".
pub const ALL_CATEGORIES: &str = "All";

pub fn find<'a>(cars: &'a [Car], id: &str) -> Option<&'a Car> {
    cars.iter().find(|car| car.id == id)
}

/// Case-insensitive substring match on make or model, ANDed with an exact
/// category match. An empty query or an absent / "All" category does not filter.
pub fn search(cars: &[Car], query: &str, category: Option<&str>) -> Vec<Car> {
    let needle = query.trim().to_lowercase();
    let category = category.filter(|c| !c.is_empty() && *c != ALL_CATEGORIES);

    cars.iter()
        .filter(|car| {
            needle.is_empty()
                || car.make.to_lowercase().contains(&needle)
                || car.model.to_lowercase().contains(&needle)
        })
        .filter(|car| category.is_none_or(|c| car.category == c))
        .cloned()
        .collect()
}

/// Distinct categories in first-seen order.
pub fn categories(cars: &[Car]) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for car in cars {
        if !seen.contains(&car.category) {
            seen.push(car.category.clone());
        }
    }
    seen
}
