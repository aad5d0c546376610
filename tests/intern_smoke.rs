// Multi-thread interning smoke test for canonical-instance identity.
use std::sync::Arc;
use std::thread;

use chatwire::api::Interner;
use url::Url;

#[test]
fn concurrent_resolves_converge_on_one_instance_per_text() {
    let interner = Arc::new(Interner::<Url>::new());

    let mut handles = Vec::new();
    for _ in 0..8 {
        let interner = Arc::clone(&interner);
        handles.push(thread::spawn(move || {
            let mut resolved = Vec::new();
            for round in 0..64 {
                let text = format!("https://svc.example/tenant-{}/", round % 4);
                resolved.push(interner.resolve(&text).expect("resolve"));
            }
            resolved
        }));
    }

    let all: Vec<Arc<Url>> = handles
        .into_iter()
        .flat_map(|handle| handle.join().expect("join"))
        .collect();

    assert_eq!(interner.len(), 4);
    for url in &all {
        let canonical = interner.resolve(url.as_str()).expect("resolve");
        assert!(Arc::ptr_eq(url, &canonical));
    }
}

#[test]
fn distinct_interners_do_not_share_instances() {
    let left = Interner::<Url>::new();
    let right = Interner::<Url>::new();
    let from_left = left.resolve("https://x/").expect("resolve");
    let from_right = right.resolve("https://x/").expect("resolve");
    assert!(!Arc::ptr_eq(&from_left, &from_right));
}
