use jobdeck::application_impl::{CacheInvalidator, CacheReader, RealJobService, keys};
use jobdeck::application_port::{JobService, ServiceError};
use jobdeck::domain_model::{CompanyId, Job, JobDraft, JobKind, Paginated, Pagination};
use jobdeck::domain_port::CacheStore;
use jobdeck::infra_memory::{MemoryCacheStore, MemoryJobRepo};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

fn reader() -> (Arc<MemoryCacheStore>, CacheReader) {
    let store = Arc::new(MemoryCacheStore::new());
    let reader = CacheReader::new(store.clone(), 300);
    (store, reader)
}

#[tokio::test]
async fn read_computes_once_then_serves_the_cached_value() {
    let (_, reader) = reader();
    let calls = Arc::new(AtomicUsize::new(0));

    for _ in 0..3 {
        let calls = calls.clone();
        let value: u32 = reader
            .read("job_pagination_1_20", || async move {
                calls.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ServiceError>(7)
            })
            .await
            .unwrap();
        assert_eq!(value, 7);
    }
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn compute_failure_is_not_cached() {
    let (store, reader) = reader();

    let err = reader
        .read("job_missing", || async {
            Err::<u32, ServiceError>(ServiceError::not_found("Job", "missing"))
        })
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));
    assert!(!store.contains("job_missing"));

    // The next read computes again and can succeed.
    let value: u32 = reader
        .read("job_missing", || async { Ok::<u32, ServiceError>(1) })
        .await
        .unwrap();
    assert_eq!(value, 1);
}

#[tokio::test]
async fn corrupt_entries_fall_back_to_compute_and_are_overwritten() {
    let (store, reader) = reader();
    store.set_ex("job_abc", "{not json", 300).await.unwrap();

    let value: u32 = reader
        .read("job_abc", || async { Ok::<u32, ServiceError>(9) })
        .await
        .unwrap();
    assert_eq!(value, 9);

    // Overwritten with the recomputed value, so a plain get parses now.
    let raw = store.get("job_abc").await.unwrap().unwrap();
    assert_eq!(raw, "9");
}

#[tokio::test]
async fn write_through_makes_the_next_read_a_hit() {
    let (_, reader) = reader();
    reader.write("company_abc", &"acme".to_string()).await;

    let value: String = reader
        .read("company_abc", || async {
            panic!("write-through entry should have been served from cache")
        })
        .await
        .unwrap();
    assert_eq!(value, "acme");
}

#[tokio::test]
async fn invalidation_removes_matching_listings_and_exact_keys_only() {
    let (store, reader) = reader();
    let invalidator = CacheInvalidator::new(store.clone());

    let plain = keys::pagination("job", &Pagination::normalized(Some(1), Some(20), None));
    let searched = keys::pagination(
        "job",
        &Pagination::normalized(Some(2), Some(10), Some("rust".into())),
    );
    let scoped = keys::scoped_pagination(
        "company",
        "abc",
        "job",
        &Pagination::normalized(Some(1), Some(20), None),
    );
    let foreign = keys::pagination("company", &Pagination::normalized(Some(1), Some(20), None));
    let entity = keys::entity("job", "abc");

    for key in [&plain, &searched, &scoped, &foreign, &entity] {
        reader.write(key, &1u32).await;
    }

    invalidator
        .invalidate(
            &[
                keys::pagination_pattern("job"),
                keys::scoped_pagination_pattern("company", "abc", "job"),
            ],
            std::slice::from_ref(&entity),
        )
        .await;

    assert!(!store.contains(&plain));
    assert!(!store.contains(&searched));
    assert!(!store.contains(&scoped));
    assert!(!store.contains(&entity));
    // Unrelated listings survive.
    assert!(store.contains(&foreign));
}

async fn job_listing(
    reader: &CacheReader,
    jobs: &Arc<dyn JobService>,
    p: &Pagination,
) -> Paginated<Job> {
    reader
        .read(&keys::pagination("job", p), || async {
            jobs.paginate(p, None).await
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn a_created_job_shows_up_after_the_listing_is_invalidated() {
    let (store, reader) = reader();
    let invalidator = CacheInvalidator::new(store.clone());
    let jobs: Arc<dyn JobService> = Arc::new(RealJobService::new(Arc::new(MemoryJobRepo::new())));
    let p = Pagination::normalized(Some(1), Some(20), None);

    // Populate the listing key while the board is still empty.
    assert!(job_listing(&reader, &jobs, &p).await.data.is_empty());

    // Write path: commit, then drop every job listing entry.
    let created = jobs
        .create(
            CompanyId(uuid::Uuid::new_v4()),
            JobDraft {
                title: "Backend engineer".to_string(),
                description: "Rust services".to_string(),
                kind: JobKind::FullTime,
                application_link: "https://acme.example/apply".to_string(),
            },
        )
        .await
        .unwrap();
    invalidator
        .invalidate(&[keys::pagination_pattern("job")], &[])
        .await;

    let listing = job_listing(&reader, &jobs, &p).await;
    assert_eq!(listing.data.len(), 1);
    assert_eq!(listing.data[0].id, created.id);
}

#[tokio::test]
async fn invalidated_listing_repopulates_on_the_next_read() {
    let (store, reader) = reader();
    let invalidator = CacheInvalidator::new(store.clone());
    let key = keys::pagination("job", &Pagination::normalized(Some(1), Some(20), None));
    let calls = Arc::new(AtomicUsize::new(0));

    for expected in [1usize, 1, 2] {
        if expected == 2 {
            invalidator
                .invalidate(&[keys::pagination_pattern("job")], &[])
                .await;
        }
        let closure_calls = calls.clone();
        reader
            .read(&key, || async move {
                closure_calls.fetch_add(1, Ordering::SeqCst);
                Ok::<u32, ServiceError>(0)
            })
            .await
            .unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), expected);
    }
}
