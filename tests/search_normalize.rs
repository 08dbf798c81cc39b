#[cfg(test)]
mod tests {
    use serde_json::json;
    use siftchat::search::models::SearchResponse;

    #[test]
    fn test_normalizes_provider_example() {
        let body = json!({
            "tasks": [{
                "result": [{
                    "items": [{
                        "type": "organic",
                        "title": "Paris Weather",
                        "url": "https://x",
                        "description": "...",
                        "timestamp": "2024-01-01 00:00:00",
                        "website_name": "x.com"
                    }]
                }]
            }]
        });

        let resp: SearchResponse = serde_json::from_value(body).unwrap();
        let items = resp.into_items();

        assert_eq!(items.len(), 1);
        let item = &items[0];
        assert_eq!(item.item_type.as_deref(), Some("organic"));
        assert_eq!(item.title.as_deref(), Some("Paris Weather"));
        assert_eq!(item.link.as_deref(), Some("https://x"));
        assert_eq!(item.snippet.as_deref(), Some("..."));
        assert_eq!(item.date.as_deref(), Some("2024-01-01"));
        assert_eq!(item.channel.as_deref(), Some("x.com"));
        assert_eq!(item.image, None);
    }

    #[test]
    fn test_missing_fields_become_none() {
        let body = json!({
            "tasks": [{
                "result": [{
                    "items": [{"type": "organic"}]
                }]
            }]
        });

        let items = serde_json::from_value::<SearchResponse>(body)
            .unwrap()
            .into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, None);
        assert_eq!(items[0].link, None);
        assert_eq!(items[0].date, None);
    }

    #[test]
    fn test_missing_items_array_yields_empty_list() {
        for body in [
            json!({}),
            json!({"tasks": []}),
            json!({"tasks": [{"result": []}]}),
            json!({"tasks": [{"result": [{}]}]}),
        ] {
            let items = serde_json::from_value::<SearchResponse>(body)
                .unwrap()
                .into_items();
            assert!(items.is_empty());
        }
    }

    #[test]
    fn test_only_first_task_and_result_are_read() {
        let body = json!({
            "tasks": [
                {"result": [
                    {"items": [{"title": "kept"}]},
                    {"items": [{"title": "ignored"}]}
                ]},
                {"result": [{"items": [{"title": "also ignored"}]}]}
            ]
        });

        let items = serde_json::from_value::<SearchResponse>(body)
            .unwrap()
            .into_items();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("kept"));
    }
}
