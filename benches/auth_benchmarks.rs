use admindash::auth::{TokenIssuer, User};
use admindash::client::{ApiRequest, AuthHeader, MemoryTokenStore, SessionState, TokenStore};
use admindash::client::interceptor::RequestInterceptor;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use std::sync::Arc;

fn sample_user() -> User {
    User::new(
        "bench-user".to_string(),
        "bench@example.com".to_string(),
        "Bench".to_string(),
        vec!["admin".to_string()],
    )
}

fn bench_tokens(c: &mut Criterion) {
    let issuer = TokenIssuer::new("bench-secret", 3600);
    let user = sample_user();

    c.bench_function("token_create", |b| {
        b.iter(|| issuer.create_token(black_box(&user)))
    });

    let token = issuer.create_token(&user).unwrap();
    c.bench_function("token_validate", |b| {
        b.iter(|| issuer.validate_token(black_box(&token)))
    });
}

fn bench_session(c: &mut Criterion) {
    let session = SessionState::new();
    let mut subscribers: Vec<_> = (0..8).map(|_| session.subscribe()).collect();
    let user = sample_user();

    c.bench_function("session_publish_8_subscribers", |b| {
        b.iter(|| {
            session.set_user(Some(black_box(user.clone())));
            for sub in subscribers.iter_mut() {
                sub.drain();
            }
        })
    });
}

fn bench_auth_header(c: &mut Criterion) {
    let tokens: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
    tokens.save_token("header.payload.signature").unwrap();
    let interceptor = AuthHeader::new(tokens);
    let req = ApiRequest::get("/api/equipment");

    c.bench_function("auth_header_intercept", |b| {
        b.iter(|| interceptor.intercept(black_box(&req)))
    });
}

criterion_group!(benches, bench_tokens, bench_session, bench_auth_header);
criterion_main!(benches);
