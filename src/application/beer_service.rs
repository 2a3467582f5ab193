use uuid::Uuid;

use crate::domain::beer::{check_beer_name, check_price, check_upc, Beer, BeerFilter};
use crate::domain::errors::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::BeerRepository;
use crate::mappers::{beer_dto_to_new_beer, beer_to_beer_dto};
use crate::models::beer::BeerDto;

/// Caller-supplied listing parameters, all optional.
#[derive(Debug, Clone, Default)]
pub struct ListBeersQuery<'a> {
    pub beer_name: Option<&'a str>,
    pub beer_style: Option<&'a str>,
    pub show_inventory: Option<bool>,
    /// 1-based.
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

pub struct BeerService<R> {
    repo: R,
}

impl<R: BeerRepository> BeerService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn list_beers(&self, query: ListBeersQuery<'_>) -> Result<Page<BeerDto>, DomainError> {
        let page_request = PageRequest::from_params(query.page_number, query.page_size)?;

        let mut beer_page = match BeerFilter::from_params(query.beer_name, query.beer_style)? {
            BeerFilter::NameLike(name) => self.repo.find_all_by_name_like(&name, page_request)?,
            BeerFilter::Style(style) => self.repo.find_all_by_style(style, page_request)?,
            BeerFilter::NameLikeAndStyle(name, style) => {
                self.repo
                    .find_all_by_name_like_and_style(&name, style, page_request)?
            }
            BeerFilter::All => self.repo.find_all(page_request)?,
        };

        // Redaction only touches the loaded copy; nothing is written back.
        if query.show_inventory == Some(false) {
            for beer in &mut beer_page.content {
                beer.quantity_on_hand = None;
            }
        }

        Ok(beer_page.map(beer_to_beer_dto))
    }

    pub fn get_beer_by_id(&self, id: Uuid) -> Result<Option<BeerDto>, DomainError> {
        Ok(self.repo.find_by_id(id)?.map(beer_to_beer_dto))
    }

    pub fn save_new_beer(&self, dto: BeerDto) -> Result<BeerDto, DomainError> {
        let saved = self.repo.insert(beer_dto_to_new_beer(dto)?)?;
        Ok(beer_to_beer_dto(saved))
    }

    /// Replace name, style, UPC, price and quantity on hand.
    pub fn update_beer_by_id(&self, id: Uuid, dto: BeerDto) -> Result<Option<BeerDto>, DomainError> {
        let Some(mut found) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };
        check_expected_version(&found, dto.version)?;

        found.replace_with(beer_dto_to_new_beer(dto)?);
        let saved = self.repo.update(&found)?;
        Ok(Some(beer_to_beer_dto(saved)))
    }

    /// Overwrite only the fields that carry a value; blank strings are
    /// treated as absent.
    pub fn patch_beer_by_id(&self, id: Uuid, dto: BeerDto) -> Result<Option<BeerDto>, DomainError> {
        let Some(mut found) = self.repo.find_by_id(id)? else {
            return Ok(None);
        };
        check_expected_version(&found, dto.version)?;

        let mut violations = Vec::new();
        if let Some(name) = dto.beer_name.filter(|n| !n.trim().is_empty()) {
            check_beer_name(&name, &mut violations);
            found.beer_name = name;
        }
        if let Some(style) = dto.beer_style {
            found.beer_style = style;
        }
        if let Some(upc) = dto.upc.filter(|u| !u.trim().is_empty()) {
            check_upc(&upc, &mut violations);
            found.upc = upc;
        }
        if let Some(price) = dto.price {
            check_price(&price, &mut violations);
            found.price = price;
        }
        if let Some(quantity_on_hand) = dto.quantity_on_hand {
            found.quantity_on_hand = Some(quantity_on_hand);
        }
        if !violations.is_empty() {
            return Err(DomainError::InvalidArgument(violations.join("; ")));
        }

        let saved = self.repo.update(&found)?;
        Ok(Some(beer_to_beer_dto(saved)))
    }

    /// `false` when nothing was stored under `id`.
    pub fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        self.repo.delete_by_id(id)
    }
}

fn check_expected_version(found: &Beer, expected: Option<i32>) -> Result<(), DomainError> {
    match expected {
        Some(version) if version != found.version => Err(DomainError::ConcurrencyConflict {
            id: found.id,
            expected_version: version,
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;
    use std::sync::Mutex;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::domain::beer::{BeerStyle, NewBeer};
    use crate::infrastructure::memory_repo::InMemoryStore;

    fn price(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    fn dto(name: &str, style: BeerStyle, qoh: Option<i32>) -> BeerDto {
        BeerDto {
            beer_name: Some(name.to_string()),
            beer_style: Some(style),
            upc: Some("0631234200036".to_string()),
            quantity_on_hand: qoh,
            price: Some(price("12.99")),
            ..Default::default()
        }
    }

    fn seeded() -> (BeerService<InMemoryStore>, Vec<BeerDto>) {
        let service = BeerService::new(InMemoryStore::new());
        let saved = [
            dto("Mango Bobs IPA", BeerStyle::Ipa, Some(10)),
            dto("King Krush", BeerStyle::PaleAle, Some(20)),
            dto("Galaxy ipa Cat", BeerStyle::PaleAle, Some(30)),
            dto("Pinball Porter", BeerStyle::Porter, Some(40)),
        ]
        .into_iter()
        .map(|d| service.save_new_beer(d).unwrap())
        .collect();
        (service, saved)
    }

    fn names(page: &Page<BeerDto>) -> Vec<String> {
        page.content
            .iter()
            .map(|b| b.beer_name.clone().unwrap())
            .collect()
    }

    #[test]
    fn unfiltered_listing_returns_everything_in_insertion_order() {
        let (service, _) = seeded();
        let page = service.list_beers(ListBeersQuery::default()).unwrap();
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.page_size, 25);
        assert_eq!(page.page_number, 1);
        assert_eq!(
            names(&page),
            ["Mango Bobs IPA", "King Krush", "Galaxy ipa Cat", "Pinball Porter"]
        );
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let (service, _) = seeded();
        let page = service
            .list_beers(ListBeersQuery {
                beer_name: Some("IPA"),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(names(&page), ["Mango Bobs IPA", "Galaxy ipa Cat"]);
    }

    #[test]
    fn style_filter_is_exact() {
        let (service, _) = seeded();
        let page = service
            .list_beers(ListBeersQuery {
                beer_style: Some("PALE_ALE"),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(names(&page), ["King Krush", "Galaxy ipa Cat"]);
        assert!(page
            .content
            .iter()
            .all(|b| b.beer_style == Some(BeerStyle::PaleAle)));
    }

    #[test]
    fn name_and_style_filters_combine() {
        let (service, _) = seeded();
        let page = service
            .list_beers(ListBeersQuery {
                beer_name: Some("ipa"),
                beer_style: Some("PALE_ALE"),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(names(&page), ["Galaxy ipa Cat"]);
    }

    #[test]
    fn unknown_style_fails_with_invalid_argument() {
        let (service, _) = seeded();
        let err = service
            .list_beers(ListBeersQuery {
                beer_style: Some("CIDER"),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidArgument(_)));
    }

    #[test]
    fn hidden_inventory_is_redacted_but_not_persisted() {
        let (service, saved) = seeded();
        let page = service
            .list_beers(ListBeersQuery {
                show_inventory: Some(false),
                ..Default::default()
            })
            .unwrap();
        assert!(page.content.iter().all(|b| b.quantity_on_hand.is_none()));

        let stored = service.get_beer_by_id(saved[0].id.unwrap()).unwrap().unwrap();
        assert_eq!(stored.quantity_on_hand, Some(10));
    }

    #[test]
    fn inventory_shown_when_true_or_omitted() {
        let (service, _) = seeded();
        for show_inventory in [Some(true), None] {
            let page = service
                .list_beers(ListBeersQuery {
                    show_inventory,
                    ..Default::default()
                })
                .unwrap();
            let qoh: Vec<_> = page.content.iter().map(|b| b.quantity_on_hand).collect();
            assert_eq!(qoh, [Some(10), Some(20), Some(30), Some(40)]);
        }
    }

    #[test]
    fn paging_uses_one_based_page_numbers() {
        let (service, _) = seeded();
        let page = service
            .list_beers(ListBeersQuery {
                page_number: Some(2),
                page_size: Some(3),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(names(&page), ["Pinball Porter"]);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page_number, 2);
    }

    #[test]
    fn page_far_past_the_end_is_empty() {
        let (service, _) = seeded();
        let page = service
            .list_beers(ListBeersQuery {
                page_number: Some(i64::MAX),
                page_size: Some(1000),
                ..Default::default()
            })
            .unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_elements, 4);
        assert_eq!(page.total_pages, 1);
    }

    /// Records the page request each query receives.
    struct RecordingRepo {
        inner: InMemoryStore,
        seen: Mutex<Vec<PageRequest>>,
    }

    impl RecordingRepo {
        fn record(&self, page: PageRequest) {
            self.seen.lock().unwrap().push(page);
        }
    }

    impl BeerRepository for RecordingRepo {
        fn find_by_id(&self, id: Uuid) -> Result<Option<Beer>, DomainError> {
            self.inner.find_by_id(id)
        }
        fn find_all(&self, page: PageRequest) -> Result<Page<Beer>, DomainError> {
            self.record(page);
            BeerRepository::find_all(&self.inner, page)
        }
        fn find_all_by_name_like(&self, name: &str, page: PageRequest) -> Result<Page<Beer>, DomainError> {
            self.record(page);
            self.inner.find_all_by_name_like(name, page)
        }
        fn find_all_by_style(&self, style: BeerStyle, page: PageRequest) -> Result<Page<Beer>, DomainError> {
            self.record(page);
            self.inner.find_all_by_style(style, page)
        }
        fn find_all_by_name_like_and_style(
            &self,
            name: &str,
            style: BeerStyle,
            page: PageRequest,
        ) -> Result<Page<Beer>, DomainError> {
            self.record(page);
            self.inner.find_all_by_name_like_and_style(name, style, page)
        }
        fn insert(&self, beer: NewBeer) -> Result<Beer, DomainError> {
            BeerRepository::insert(&self.inner, beer)
        }
        fn update(&self, beer: &Beer) -> Result<Beer, DomainError> {
            self.inner.update(beer)
        }
        fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
            self.inner.exists_by_id(id)
        }
        fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
            self.inner.delete_by_id(id)
        }
    }

    #[test]
    fn repository_receives_zero_based_index_and_clamped_size() {
        let service = BeerService::new(RecordingRepo {
            inner: InMemoryStore::new(),
            seen: Mutex::new(Vec::new()),
        });
        let cases = [
            (Some(1), None, 0, 25),
            (Some(7), Some(10), 6, 10),
            (Some(0), Some(5000), 0, 1000),
            (None, Some(1000), 0, 1000),
            (Some(-4), None, 0, 25),
        ];
        for (page_number, page_size, _, _) in cases {
            service
                .list_beers(ListBeersQuery {
                    page_number,
                    page_size,
                    ..Default::default()
                })
                .unwrap();
        }

        let seen = service.repo.seen.lock().unwrap();
        let expected: Vec<_> = cases
            .iter()
            .map(|&(_, _, index, size)| PageRequest::new(index, size).unwrap())
            .collect();
        assert_eq!(*seen, expected);
    }

    #[test]
    fn get_unknown_id_is_absent() {
        let (service, _) = seeded();
        assert!(service.get_beer_by_id(Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn save_new_beer_assigns_identity_and_version() {
        let service = BeerService::new(InMemoryStore::new());
        let saved = service
            .save_new_beer(dto("Crank", BeerStyle::Wheat, None))
            .unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.version, Some(0));
        assert!(saved.created_date.is_some());
    }

    #[test]
    fn save_new_beer_rejects_missing_price() {
        let service = BeerService::new(InMemoryStore::new());
        let mut incomplete = dto("Crank", BeerStyle::Wheat, None);
        incomplete.price = None;
        assert!(matches!(
            service.save_new_beer(incomplete),
            Err(DomainError::InvalidArgument(_))
        ));
    }

    #[test]
    fn update_replaces_all_caller_fields() {
        let (service, saved) = seeded();
        let id = saved[0].id.unwrap();

        let updated = service
            .update_beer_by_id(id, dto("Renamed", BeerStyle::Stout, None))
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.beer_name.as_deref(), Some("Renamed"));
        assert_eq!(updated.beer_style, Some(BeerStyle::Stout));
        assert_eq!(updated.quantity_on_hand, None);
        assert_eq!(updated.version, Some(1));
        assert_eq!(updated.created_date, saved[0].created_date);
    }

    #[test]
    fn update_and_patch_on_unknown_id_are_absent() {
        let (service, _) = seeded();
        let id = Uuid::new_v4();
        assert!(service
            .update_beer_by_id(id, dto("x", BeerStyle::Ale, None))
            .unwrap()
            .is_none());
        assert!(service
            .patch_beer_by_id(id, BeerDto::default())
            .unwrap()
            .is_none());
    }

    #[test]
    fn update_with_stale_version_conflicts() {
        let (service, saved) = seeded();
        let id = saved[1].id.unwrap();
        service
            .patch_beer_by_id(
                id,
                BeerDto {
                    upc: Some("1".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let mut stale = dto("King Krush", BeerStyle::PaleAle, Some(1));
        stale.version = Some(0);
        assert!(matches!(
            service.update_beer_by_id(id, stale),
            Err(DomainError::ConcurrencyConflict { expected_version: 0, .. })
        ));
    }

    #[test]
    fn patch_with_only_price_changes_only_price() {
        let (service, saved) = seeded();
        let before = saved[3].clone();
        let id = before.id.unwrap();

        let patched = service
            .patch_beer_by_id(
                id,
                BeerDto {
                    price: Some(price("7.25")),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();

        assert_eq!(patched.price, Some(price("7.25")));
        assert_eq!(patched.beer_name, before.beer_name);
        assert_eq!(patched.beer_style, before.beer_style);
        assert_eq!(patched.upc, before.upc);
        assert_eq!(patched.quantity_on_hand, before.quantity_on_hand);
    }

    #[test]
    fn patch_ignores_blank_strings() {
        let (service, saved) = seeded();
        let id = saved[0].id.unwrap();
        let patched = service
            .patch_beer_by_id(
                id,
                BeerDto {
                    beer_name: Some("   ".to_string()),
                    upc: Some(String::new()),
                    quantity_on_hand: Some(0),
                    ..Default::default()
                },
            )
            .unwrap()
            .unwrap();
        assert_eq!(patched.beer_name, saved[0].beer_name);
        assert_eq!(patched.upc, saved[0].upc);
        assert_eq!(patched.quantity_on_hand, Some(0));
    }

    #[test]
    fn patch_rejects_overlong_name() {
        let (service, saved) = seeded();
        let result = service.patch_beer_by_id(
            saved[0].id.unwrap(),
            BeerDto {
                beer_name: Some("x".repeat(60)),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));
    }

    #[test]
    fn patch_rejects_price_with_three_decimals() {
        let (service, saved) = seeded();
        let id = saved[0].id.unwrap();
        let result = service.patch_beer_by_id(
            id,
            BeerDto {
                price: Some(price("12.999")),
                ..Default::default()
            },
        );
        assert!(matches!(result, Err(DomainError::InvalidArgument(_))));

        let stored = service.get_beer_by_id(id).unwrap().unwrap();
        assert_eq!(stored.price, Some(price("12.99")));
    }

    #[test]
    fn delete_reports_whether_anything_was_removed() {
        let (service, saved) = seeded();
        let id = saved[2].id.unwrap();

        assert!(!service.delete_by_id(Uuid::new_v4()).unwrap());
        assert_eq!(
            service.list_beers(ListBeersQuery::default()).unwrap().total_elements,
            4
        );

        assert!(service.delete_by_id(id).unwrap());
        assert!(service.get_beer_by_id(id).unwrap().is_none());
    }
}
