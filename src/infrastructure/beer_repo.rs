use chrono::Utc;
use diesel::pg::Pg;
use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::beer::{Beer, BeerFilter, BeerStyle, NewBeer};
use crate::domain::errors::DomainError;
use crate::domain::page::{Page, PageRequest};
use crate::domain::ports::BeerRepository;
use crate::schema::beers;

use super::models::{BeerChangeset, BeerRow, NewBeerRow};

#[derive(Clone)]
pub struct DieselBeerRepository {
    pool: DbPool,
}

impl DieselBeerRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn load_page(&self, filter: BeerFilter, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        let mut conn = self.pool.get()?;
        log::debug!("loading beers filter={:?} page={:?}", filter, page);

        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = filtered(&filter).count().get_result(conn)?;

            let rows = filtered(&filter)
                .select(BeerRow::as_select())
                .order((beers::created_date.asc(), beers::id.asc()))
                .limit(page.page_size)
                .offset(page.offset())
                .load(conn)?;

            let content = rows
                .into_iter()
                .map(Beer::try_from)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Page::new(content, page, total))
        })
    }
}

/// Escape LIKE metacharacters so the name filter is a literal substring match.
fn like_pattern(name: &str) -> String {
    let mut escaped = String::with_capacity(name.len() + 2);
    escaped.push('%');
    for c in name.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn filtered(filter: &BeerFilter) -> beers::BoxedQuery<'static, Pg> {
    let query = beers::table.into_boxed();
    match filter {
        BeerFilter::All => query,
        BeerFilter::NameLike(name) => query.filter(beers::beer_name.ilike(like_pattern(name))),
        BeerFilter::Style(style) => query.filter(beers::beer_style.eq(style.as_str())),
        BeerFilter::NameLikeAndStyle(name, style) => query
            .filter(beers::beer_name.ilike(like_pattern(name)))
            .filter(beers::beer_style.eq(style.as_str())),
    }
}

impl BeerRepository for DieselBeerRepository {
    fn find_by_id(&self, id: Uuid) -> Result<Option<Beer>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = beers::table
            .filter(beers::id.eq(id))
            .select(BeerRow::as_select())
            .first(&mut conn)
            .optional()?;

        row.map(Beer::try_from).transpose()
    }

    fn find_all(&self, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        self.load_page(BeerFilter::All, page)
    }

    fn find_all_by_name_like(&self, name: &str, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        self.load_page(BeerFilter::NameLike(name.to_string()), page)
    }

    fn find_all_by_style(&self, style: BeerStyle, page: PageRequest) -> Result<Page<Beer>, DomainError> {
        self.load_page(BeerFilter::Style(style), page)
    }

    fn find_all_by_name_like_and_style(
        &self,
        name: &str,
        style: BeerStyle,
        page: PageRequest,
    ) -> Result<Page<Beer>, DomainError> {
        self.load_page(BeerFilter::NameLikeAndStyle(name.to_string(), style), page)
    }

    fn insert(&self, beer: NewBeer) -> Result<Beer, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(beers::table)
            .values(&NewBeerRow {
                id: Uuid::new_v4(),
                beer_name: beer.beer_name,
                beer_style: beer.beer_style.as_str().to_string(),
                upc: beer.upc,
                quantity_on_hand: beer.quantity_on_hand,
                price: beer.price,
            })
            .returning(BeerRow::as_returning())
            .get_result(&mut conn)?;

        log::debug!("inserted beer {}", row.id);
        Beer::try_from(row)
    }

    fn update(&self, beer: &Beer) -> Result<Beer, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // Compare-and-swap on the version column; zero rows means another
            // writer got there first (or the row is gone).
            let row = diesel::update(
                beers::table
                    .filter(beers::id.eq(beer.id))
                    .filter(beers::version.eq(beer.version)),
            )
            .set((
                BeerChangeset {
                    beer_name: &beer.beer_name,
                    beer_style: beer.beer_style.as_str(),
                    upc: &beer.upc,
                    quantity_on_hand: beer.quantity_on_hand,
                    price: &beer.price,
                    update_date: Utc::now(),
                },
                beers::version.eq(beers::version + 1),
            ))
            .returning(BeerRow::as_returning())
            .get_result(conn)
            .optional()?;

            match row {
                Some(row) => Beer::try_from(row),
                None => Err(DomainError::ConcurrencyConflict {
                    id: beer.id,
                    expected_version: beer.version,
                }),
            }
        })
    }

    fn exists_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let exists = diesel::select(diesel::dsl::exists(beers::table.filter(beers::id.eq(id))))
            .get_result(&mut conn)?;
        Ok(exists)
    }

    fn delete_by_id(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let deleted = diesel::delete(beers::table.filter(beers::id.eq(id))).execute(&mut conn)?;
        log::debug!("deleted {} beer row(s) for {}", deleted, id);
        Ok(deleted > 0)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use bigdecimal::BigDecimal;

    use super::*;
    use crate::infrastructure::test_db::setup_db;

    fn new_beer(name: &str, style: BeerStyle) -> NewBeer {
        NewBeer {
            beer_name: name.to_string(),
            beer_style: style,
            upc: "0631234200036".to_string(),
            quantity_on_hand: Some(122),
            price: BigDecimal::from_str("12.99").expect("valid decimal"),
        }
    }

    fn first_page(size: i64) -> PageRequest {
        PageRequest::new(0, size).expect("valid page")
    }

    #[test]
    fn like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("IPA"), "%IPA%");
        assert_eq!(like_pattern("100%_x"), "%100\\%\\_x%");
    }

    #[tokio::test]
    async fn insert_and_find_by_id_roundtrip() {
        let (_container, pool) = setup_db().await;
        let repo = DieselBeerRepository::new(pool);

        let saved = repo
            .insert(new_beer("Galaxy Cat", BeerStyle::PaleAle))
            .expect("insert failed");
        assert_eq!(saved.version, 0);

        let found = repo
            .find_by_id(saved.id)
            .expect("find failed")
            .expect("beer should exist");
        assert_eq!(found.beer_name, "Galaxy Cat");
        assert_eq!(found.beer_style, BeerStyle::PaleAle);
        assert_eq!(found.quantity_on_hand, Some(122));
    }

    #[tokio::test]
    async fn find_by_id_returns_none_for_unknown_id() {
        let (_container, pool) = setup_db().await;
        let repo = DieselBeerRepository::new(pool);

        let result = repo
            .find_by_id(Uuid::new_v4())
            .expect("find should not error");

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn filters_select_the_right_rows() {
        let (_container, pool) = setup_db().await;
        let repo = DieselBeerRepository::new(pool);

        repo.insert(new_beer("Mango Bobs IPA", BeerStyle::Ipa)).expect("insert");
        repo.insert(new_beer("King Krush ipa", BeerStyle::PaleAle)).expect("insert");
        repo.insert(new_beer("Pinball Porter", BeerStyle::Porter)).expect("insert");

        let by_name = repo.find_all_by_name_like("IpA", first_page(10)).expect("by name");
        assert_eq!(by_name.total_elements, 2);

        let by_style = repo.find_all_by_style(BeerStyle::Porter, first_page(10)).expect("by style");
        assert_eq!(by_style.total_elements, 1);
        assert_eq!(by_style.content[0].beer_name, "Pinball Porter");

        let both = repo
            .find_all_by_name_like_and_style("ipa", BeerStyle::PaleAle, first_page(10))
            .expect("by both");
        assert_eq!(both.total_elements, 1);
        assert_eq!(both.content[0].beer_name, "King Krush ipa");

        let literal = repo.find_all_by_name_like("%", first_page(10)).expect("literal");
        assert_eq!(literal.total_elements, 0);
    }

    #[tokio::test]
    async fn find_all_paginates_in_insertion_order() {
        let (_container, pool) = setup_db().await;
        let repo = DieselBeerRepository::new(pool);

        for i in 0..5 {
            repo.insert(new_beer(&format!("Beer {}", i), BeerStyle::Ale))
                .expect("insert failed");
        }

        let page1 = repo.find_all(first_page(3)).expect("page 1");
        assert_eq!(page1.total_elements, 5);
        assert_eq!(page1.total_pages, 2);
        assert_eq!(page1.content.len(), 3);
        assert_eq!(page1.content[0].beer_name, "Beer 0");

        let page2 = repo
            .find_all(PageRequest::new(1, 3).expect("valid page"))
            .expect("page 2");
        assert_eq!(page2.content.len(), 2);
        assert_eq!(page2.content[1].beer_name, "Beer 4");
    }

    #[tokio::test]
    async fn update_bumps_version_and_rejects_stale_writes() {
        let (_container, pool) = setup_db().await;
        let repo = DieselBeerRepository::new(pool);
        let saved = repo.insert(new_beer("Crank", BeerStyle::Wheat)).expect("insert");

        let mut edited = saved.clone();
        edited.quantity_on_hand = None;
        let updated = repo.update(&edited).expect("update failed");
        assert_eq!(updated.version, 1);
        assert_eq!(updated.quantity_on_hand, None);

        let mut stale = saved;
        stale.upc = "999".to_string();
        let err = repo.update(&stale).expect_err("stale write must fail");
        assert!(matches!(
            err,
            DomainError::ConcurrencyConflict { expected_version: 0, .. }
        ));
    }

    #[tokio::test]
    async fn delete_and_exists() {
        let (_container, pool) = setup_db().await;
        let repo = DieselBeerRepository::new(pool);
        let saved = repo.insert(new_beer("Sunshine City", BeerStyle::Ipa)).expect("insert");

        assert!(repo.exists_by_id(saved.id).expect("exists"));
        assert!(repo.delete_by_id(saved.id).expect("delete"));
        assert!(!repo.exists_by_id(saved.id).expect("exists"));
        assert!(!repo.delete_by_id(saved.id).expect("second delete"));
    }
}
