// Free-text lookup over the name field of any record kind.
use shared::models::NamedRecord;

/// Records whose name contains `query`, ignoring case. A blank query matches nothing.
pub fn search_by_name<'a, T: NamedRecord>(records: &'a [T], query: &str) -> Vec<&'a T> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    records
        .iter()
        .filter(|r| r.name_field().to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use shared::models::PersonnelRecord;

    fn person(name: &str) -> PersonnelRecord {
        PersonnelRecord {
            name: name.into(),
            role: "VIGIA".into(),
            net_amount: 1.0,
            period: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        }
    }

    #[test]
    fn matches_any_part_of_the_name() {
        let records = vec![person("ANA MENEZES"), person("BETO ARAGÃO"), person("CARLA MENEZES PRADO")];
        let found = search_by_name(&records, "  menezes ");
        assert_eq!(found.len(), 2);
        assert_eq!(search_by_name(&records, "aragão")[0].name, "BETO ARAGÃO");
    }

    #[test]
    fn blank_query_finds_nothing() {
        let records = vec![person("ANA MENEZES")];
        assert!(search_by_name(&records, "   ").is_empty());
    }
}
