mod test_startup;
use test_startup::*;

#[actix_rt::test]
async fn check_server_health() {
    let app = spawn_app().await;

    for path in ["/", "/v1/healthcheck"] {
        let res = app.get(path).await;

        assert!(res.status().is_success());
        assert_eq!(
            res.headers()["content-type"].to_str().unwrap(),
            "text/plain; charset=utf-8"
        );
        let body = res.text().await.expect("Failed to read the response body");
        assert_eq!(
            body,
            format!(
                "Status: Available\nenvironment: {}\nversion: {}\n",
                app.settings.application.environment,
                env!("CARGO_PKG_VERSION")
            )
        );
    }
}

#[actix_rt::test]
async fn health_check_rejects_other_methods() {
    let app = spawn_app().await;
    let res = reqwest::Client::new()
        .post(format!("{}/", app.address))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(res.status().as_u16(), 405);
    assert_eq!(res.headers()["allow"].to_str().unwrap(), "GET");
    let body = res
        .json::<serde_json::Value>()
        .await
        .expect("Failed to parse the response body");
    assert_eq!(
        body["error"],
        "the POST method is not supported for this resource"
    );
}
