use serde_json::{json, Value};

use crate::api::{ApiClient, RetryPolicy};
use std::time::Duration;

pub fn client_for(server: &httpmock::MockServer) -> ApiClient {
    ApiClient::new_with_base_url(server.url("/api")).with_retry_policy(RetryPolicy {
        base_delay: Duration::ZERO,
        ..RetryPolicy::default()
    })
}

pub fn product_json(id: i64, title: &str, price: &str, category: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{} description", title),
        "category": { "id": 1, "name": category },
        "image_url": format!("https://fakestoreapi.com/img/{}.jpg", id),
        "created_at": "2024-05-10T14:20:00.000000Z",
        "updated_at": "2024-05-11T09:05:00.000000Z"
    })
}

pub fn products_page_json(products: Vec<Value>, page: u32, per_page: u32, total: u64) -> Value {
    let count = products.len() as u64;
    let from = (page as u64 - 1) * per_page as u64 + 1;
    json!({
        "data": {
            "current_page": page,
            "data": products,
            "per_page": per_page,
            "total": total,
            "last_page": total.div_ceil(per_page as u64).max(1),
            "from": if count == 0 { Value::Null } else { json!(from) },
            "to": if count == 0 { Value::Null } else { json!(from + count - 1) },
            "first_page_url": "http://localhost/api/catalogo/products?page=1",
            "last_page_url": "http://localhost/api/catalogo/products?page=1",
            "next_page_url": null,
            "prev_page_url": null,
            "path": "http://localhost/api/catalogo/products"
        }
    })
}

pub fn categories_json() -> Value {
    json!({
        "data": [
            { "id": 1, "name": "electronics", "products_count": 6,
              "created_at": "2024-05-10T14:20:00Z", "updated_at": "2024-05-10T14:20:00Z" },
            { "id": 2, "name": "jewelery", "products_count": 4,
              "created_at": "2024-05-12T10:00:00Z", "updated_at": "2024-05-12T10:00:00Z" }
        ]
    })
}

pub fn stats_json() -> Value {
    json!({
        "data": {
            "total_products": 10,
            "avg_price": 123.45,
            "by_category": [
                { "category": "electronics", "total": 6 },
                { "category": "jewelery", "total": 4 }
            ],
            "top5_expensive": [{
                "id": 14,
                "title": "Samsung 49-Inch CHG90",
                "price": "999.99",
                "image_url": "https://fakestoreapi.com/img/81Zt42ioCgL.jpg",
                "category_name": "electronics",
                "description": "49 INCH SUPER ULTRAWIDE"
            }]
        }
    })
}

pub fn activity_json() -> Value {
    json!({
        "data": [
            {
                "id": 2,
                "description": "updated",
                "event": "updated",
                "properties": {
                    "attributes": { "price": "12.50", "title": "New" },
                    "old": { "price": "10.00", "title": "Old" }
                },
                "created_at": "2024-05-11T09:05:00Z",
                "causer": { "id": 1, "name": "Admin" }
            },
            {
                "id": 1,
                "description": "created",
                "event": "created",
                "properties": [],
                "created_at": "2024-05-10T14:20:00Z",
                "causer": null
            }
        ]
    })
}

pub fn sync_json(mode: &str) -> Value {
    json!({
        "success": true,
        "mode": mode,
        "limit": if mode == "limited" { json!(5) } else { Value::Null },
        "result": {
            "imported": 3,
            "updated": 1,
            "skipped": 1,
            "errors": [],
            "imported_products": [
                { "id": 1, "title": "Backpack", "external_id": 1, "price": "109.95", "category_name": "men's clothing" }
            ],
            "updated_products": [],
            "skipped_products": [
                { "id": 2, "title": "T-Shirt", "external_id": 2, "reason": "unchanged" }
            ]
        }
    })
}
