//! End-to-end dispatch tests exercising registration, matching, chain
//! execution, interceptors, and the not-found path together.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use http::Method;
use switchboard_core::{handle_fn, Context, Dispatcher, HandleFunc};

#[derive(Default)]
struct Trace {
    steps: Vec<String>,
}

fn step(label: &str) -> HandleFunc<Trace> {
    let label = label.to_string();
    handle_fn(move |ctx: &mut Context<Trace>| {
        let entry = match ctx.params() {
            [] => label.clone(),
            captured => format!("{label}({})", captured.join(",")),
        };
        if let Some(trace) = ctx.data_mut().as_mut() {
            trace.steps.push(entry);
        }
    })
}

fn run(app: &Dispatcher<Trace>, method: &Method, path: &str) -> Vec<String> {
    app.dispatch_with(method, path, Trace::default())
        .map(|t| t.steps)
        .unwrap_or_default()
}

#[test]
fn test_mixed_route_table() {
    let mut app: Dispatcher<Trace> = Dispatcher::new();
    app.get("/users/:", vec![step("user")]).unwrap();
    app.get("/users", vec![step("users")]).unwrap();
    app.get("/assets/*", vec![step("asset")]).unwrap();
    app.not_found(vec![step("404")]);

    assert_eq!(run(&app, &Method::GET, "/users/42"), ["user(42)"]);
    assert_eq!(run(&app, &Method::GET, "/users"), ["users"]);
    assert_eq!(
        run(&app, &Method::GET, "/assets/css/site.css"),
        ["asset(css/site.css)"]
    );
    // Same path, unregistered method: falls through to the not-found chain.
    assert_eq!(run(&app, &Method::POST, "/users"), ["404"]);
}

#[test]
fn test_interceptor_counts_per_registration() {
    // Two interceptor generations: routes keep the interceptors that were
    // current when they were registered.
    let g1 = Arc::new(AtomicUsize::new(0));
    let g2 = Arc::new(AtomicUsize::new(0));

    let mut app: Dispatcher<Trace> = Dispatcher::new();
    let c1 = Arc::clone(&g1);
    app.intercept(vec![handle_fn(move |_ctx: &mut Context<Trace>| {
        c1.fetch_add(1, Ordering::SeqCst);
    })]);
    app.get("/one", vec![step("one")]).unwrap();

    let c1b = Arc::clone(&g1);
    let c2 = Arc::clone(&g2);
    app.intercept(vec![
        handle_fn(move |_ctx: &mut Context<Trace>| {
            c1b.fetch_add(1, Ordering::SeqCst);
        }),
        handle_fn(move |_ctx: &mut Context<Trace>| {
            c2.fetch_add(1, Ordering::SeqCst);
        }),
    ]);
    app.get("/two", vec![step("two")]).unwrap();

    app.dispatch(&Method::GET, "/one");
    assert_eq!(g1.load(Ordering::SeqCst), 1);
    assert_eq!(g2.load(Ordering::SeqCst), 0);

    app.dispatch(&Method::GET, "/two");
    assert_eq!(g1.load(Ordering::SeqCst), 2);
    assert_eq!(g2.load(Ordering::SeqCst), 1);
}

#[test]
fn test_abort_skips_downstream_handlers() {
    let mut app: Dispatcher<Trace> = Dispatcher::new();
    let guard = handle_fn(|ctx: &mut Context<Trace>| {
        let denied = ctx.param(0) == Some("blocked");
        if let Some(trace) = ctx.data_mut().as_mut() {
            trace.steps.push("guard".into());
        }
        if denied {
            ctx.abort();
        }
    });
    app.get("/rooms/:", vec![guard, step("room")]).unwrap();

    assert_eq!(run(&app, &Method::GET, "/rooms/open"), ["guard", "room(open)"]);
    assert_eq!(run(&app, &Method::GET, "/rooms/blocked"), ["guard"]);
}

#[test]
fn test_next_wraps_remainder() {
    let mut app: Dispatcher<Trace> = Dispatcher::new();
    let around = handle_fn(|ctx: &mut Context<Trace>| {
        if let Some(trace) = ctx.data_mut().as_mut() {
            trace.steps.push("before".into());
        }
        ctx.next();
        if let Some(trace) = ctx.data_mut().as_mut() {
            trace.steps.push("after".into());
        }
    });
    app.get("/timed", vec![around, step("work")]).unwrap();

    assert_eq!(
        run(&app, &Method::GET, "/timed"),
        ["before", "work", "after"]
    );
}

#[test]
fn test_scoped_registration_end_to_end() {
    let mut app: Dispatcher<Trace> = Dispatcher::new();
    {
        let mut api = app.scope("/api");
        api.get("/health", vec![step("health")]).unwrap();
        let mut v2 = api.scope("/v2");
        v2.post("orders/:", vec![step("order")]).unwrap();
        v2.get("/files/*", vec![step("file")]).unwrap();
    }

    assert_eq!(run(&app, &Method::GET, "/api/health"), ["health"]);
    assert_eq!(run(&app, &Method::POST, "/api/v2/orders/9"), ["order(9)"]);
    assert_eq!(
        run(&app, &Method::GET, "/api/v2/files/a/b.txt"),
        ["file(a/b.txt)"]
    );
}

#[test]
fn test_conflicting_registration_keeps_existing_routes() {
    let mut app: Dispatcher<Trace> = Dispatcher::new();
    app.get("/docs/guide", vec![step("guide")]).unwrap();
    assert!(app.get("/docs/:", vec![step("param")]).is_err());

    assert_eq!(run(&app, &Method::GET, "/docs/guide"), ["guide"]);
    assert_eq!(run(&app, &Method::GET, "/docs/other"), Vec::<String>::new());
}

#[test]
fn test_concurrent_dispatch_shares_the_pool() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Dispatcher<()>>();

    let hits = Arc::new(AtomicUsize::new(0));
    let mut app: Dispatcher<()> = Dispatcher::new();
    let counter = Arc::clone(&hits);
    app.get(
        "/work/:",
        vec![handle_fn(move |_ctx: &mut Context<()>| {
            counter.fetch_add(1, Ordering::SeqCst);
        })],
    )
    .unwrap();
    let app = Arc::new(app);

    let workers: Vec<_> = (0..8)
        .map(|worker| {
            let app = Arc::clone(&app);
            std::thread::spawn(move || {
                for n in 0..500 {
                    assert!(app.dispatch(&Method::GET, &format!("/work/{worker}-{n}")));
                }
            })
        })
        .collect();
    for worker in workers {
        worker.join().unwrap();
    }

    assert_eq!(hits.load(Ordering::SeqCst), 8 * 500);
}

#[test]
fn test_dispatch_reports_match() {
    let mut app: Dispatcher<Trace> = Dispatcher::new();
    app.get("/here", vec![step("here")]).unwrap();

    assert!(app.dispatch(&Method::GET, "/here"));
    assert!(!app.dispatch(&Method::GET, "/elsewhere"));
    assert!(!app.dispatch(&Method::DELETE, "/here"));
}
