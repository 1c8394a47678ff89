use std::sync::{Arc, Mutex};

use bytes::Bytes;
use trellis::middleware::Next;
use trellis::{Request, Response, Router, StatusCode};

fn request(method: &str, uri: &str) -> Request {
    let inner = http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Bytes::new())
        .unwrap();
    Request::new(inner)
}

/// Answers with its own tag followed by the captured variables.
fn tagged(tag: &'static str) -> impl trellis::Handler {
    move |req: Request| async move {
        let mut vars: Vec<_> = req.vars().iter().map(|(k, v)| format!("{k}={v}")).collect();
        vars.sort();
        format!("{tag} {}", vars.join(","))
    }
}

fn body(res: &Response) -> &str {
    std::str::from_utf8(res.body()).unwrap()
}

fn products() -> Router {
    Router::new()
        .get("/products", tagged("h0"))
        .get("/products/:pid", tagged("h1"))
        .get("/products/carts", tagged("h2"))
}

#[tokio::test]
async fn products_end_to_end() {
    let router = products();

    let res = router.dispatch(request("GET", "/products/carts")).await;
    assert_eq!(body(&res), "h2 ");

    let res = router.dispatch(request("GET", "/products/999")).await;
    assert_eq!(body(&res), "h1 pid=999");

    let res = router.dispatch(request("GET", "/products")).await;
    assert_eq!(body(&res), "h0 ");

    let res = router.dispatch(request("DELETE", "/products")).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn literal_and_variable_routes_side_by_side() {
    let router = Router::new()
        .get("/", tagged("root-get"))
        .post("/", tagged("root-post"))
        .get("/a/b", tagged("ab"))
        .get("/a/:id", tagged("a-id"))
        .get("/a/b/c", tagged("abc"))
        .get("/a/:id/c", tagged("a-id-c"));

    let cases = [
        ("GET", "/", "root-get "),
        ("POST", "/", "root-post "),
        ("GET", "/a/b", "ab "),
        ("GET", "/a/123", "a-id id=123"),
        ("GET", "/a/b/c", "abc "),
        ("GET", "/a/123/c", "a-id-c id=123"),
    ];
    for (method, path, want) in cases {
        let res = router.dispatch(request(method, path)).await;
        assert_eq!(res.status_code(), StatusCode::OK, "{method} {path}");
        assert_eq!(body(&res), want, "{method} {path}");
    }

    let res = router.dispatch(request("GET", "/a/b/c/d")).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = router.dispatch(request("PUT", "/a/b/c")).await;
    assert_eq!(res.status_code(), StatusCode::METHOD_NOT_ALLOWED);
}

#[tokio::test]
async fn literal_sibling_does_not_pull_deeper_routes_from_variable() {
    // `/a/b` exists as a literal, so `/a/b/c` walks the literal branch and
    // must not fall back to `/a/:id/c` once it gets there.
    let router = Router::new()
        .get("/a/b", tagged("ab"))
        .get("/a/:id/c", tagged("a-id-c"));

    let res = router.dispatch(request("GET", "/a/b/c")).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);

    let res = router.dispatch(request("GET", "/a/x/c")).await;
    assert_eq!(body(&res), "a-id-c id=x");
}

#[tokio::test]
async fn middleware_wraps_routes_and_fallbacks_in_registration_order() {
    let log: Arc<Mutex<Vec<String>>> = Arc::default();

    let outer = {
        let log = Arc::clone(&log);
        move |req: Request, next: Next| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push("m1-pre".into());
                let res = next.run(req).await;
                log.lock().unwrap().push("m1-post".into());
                res
            }
        }
    };
    let inner = {
        let log = Arc::clone(&log);
        move |req: Request, next: Next| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push("m2-pre".into());
                let res = next.run(req).await;
                log.lock().unwrap().push(format!("m2-post {}", res.status_code().as_u16()));
                res
            }
        }
    };
    let handler = {
        let log = Arc::clone(&log);
        move |_req: Request| {
            let log = Arc::clone(&log);
            async move {
                log.lock().unwrap().push("handler".into());
                "ok"
            }
        }
    };

    let router = Router::new()
        .middleware(outer)
        .middleware(inner)
        .get("/ping", handler);

    router.dispatch(request("GET", "/ping")).await;
    assert_eq!(
        log.lock().unwrap().drain(..).collect::<Vec<_>>(),
        ["m1-pre", "m2-pre", "handler", "m2-post 200", "m1-post"],
    );

    router.dispatch(request("GET", "/missing")).await;
    assert_eq!(
        log.lock().unwrap().drain(..).collect::<Vec<_>>(),
        ["m1-pre", "m2-pre", "m2-post 404", "m1-post"],
    );

    router.dispatch(request("POST", "/ping")).await;
    assert_eq!(
        log.lock().unwrap().drain(..).collect::<Vec<_>>(),
        ["m1-pre", "m2-pre", "m2-post 405", "m1-post"],
    );
}

#[tokio::test]
async fn failed_registration_keeps_existing_routes() {
    let mut router = products();
    assert!(router.handle("GET", "/products/:pid", tagged("dup")).is_err());
    assert!(router.handle("GET", "/products/:id/stars", tagged("renamed")).is_err());

    let res = router.dispatch(request("GET", "/products/7")).await;
    assert_eq!(body(&res), "h1 pid=7");

    // The rejected registration created no route at `/products/7/stars`.
    let res = router.dispatch(request("GET", "/products/7/stars")).await;
    assert_eq!(res.status_code(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn request_paths_are_normalized_before_lookup() {
    let router = products();

    for path in ["/products/", "//products", "/products/./", "/x/../products"] {
        let res = router.dispatch(request("GET", path)).await;
        assert_eq!(body(&res), "h0 ", "{path}");
    }
}

#[tokio::test]
async fn concurrent_dispatch_shares_one_router() {
    let router = Arc::new(products());

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..64 {
        let router = Arc::clone(&router);
        tasks.spawn(async move {
            let res = router.dispatch(request("GET", &format!("/products/{i}"))).await;
            (i, String::from_utf8(res.body().to_vec()).unwrap())
        });
    }

    while let Some(joined) = tasks.join_next().await {
        let (i, body) = joined.unwrap();
        assert_eq!(body, format!("h1 pid={i}"));
    }
}
