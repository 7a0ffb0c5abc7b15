use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use toon_codec::{
    from_str, from_str_with_options, to_string, to_string_with_options, to_value, DecodeOptions,
    Delimiter, EncodeOptions, Value,
};

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct User {
    id: u32,
    name: String,
    active: bool,
    tags: Vec<String>,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Product {
    sku: String,
    price: f64,
    quantity: u32,
}

#[derive(Serialize, Deserialize, Debug, PartialEq)]
struct Order {
    order_id: u32,
    customer: User,
    items: Vec<Product>,
    total: f64,
}

#[test]
fn simple_struct() {
    let user = User {
        id: 123,
        name: "Marta".to_string(),
        active: true,
        tags: vec!["admin".to_string(), "developer".to_string()],
    };

    let text = to_string(&user).unwrap();
    assert_eq!(
        text,
        "id: 123\nname: Marta\nactive: true\ntags[2]: admin, developer"
    );

    let back: User = from_str(&text).unwrap();
    assert_eq!(user, back);
}

#[test]
fn nested_struct() {
    let order = Order {
        order_id: 12345,
        customer: User {
            id: 123,
            name: "Marta".to_string(),
            active: true,
            tags: vec!["vip".to_string()],
        },
        items: vec![
            Product {
                sku: "WIDGET-001".to_string(),
                price: 29.99,
                quantity: 2,
            },
            Product {
                sku: "GADGET-002".to_string(),
                price: 49.99,
                quantity: 1,
            },
        ],
        total: 109.97,
    };

    let text = to_string(&order).unwrap();
    let back: Order = from_str(&text).unwrap();
    assert_eq!(order, back);
}

#[test]
fn array_of_structs_is_tabular() {
    let products = vec![
        Product {
            sku: "A1".to_string(),
            price: 9.99,
            quantity: 2,
        },
        Product {
            sku: "B2".to_string(),
            price: 14.5,
            quantity: 1,
        },
    ];

    let text = to_string(&products).unwrap();
    assert_eq!(
        text,
        "[2]{price, quantity, sku}:\n  9.99, 2, A1\n  14.5, 1, B2"
    );

    let back: Vec<Product> = from_str(&text).unwrap();
    assert_eq!(products, back);
}

#[test]
fn primitive_collections() {
    let numbers = vec![1, 2, 3, 4, 5];
    let text = to_string(&numbers).unwrap();
    assert_eq!(text, "[5]: 1, 2, 3, 4, 5");
    let back: Vec<i32> = from_str(&text).unwrap();
    assert_eq!(numbers, back);

    let empty: Vec<String> = vec![];
    let text = to_string(&empty).unwrap();
    let back: Vec<String> = from_str(&text).unwrap();
    assert_eq!(empty, back);
}

#[test]
fn optional_fields() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Settings {
        theme: Option<String>,
        retries: Option<u32>,
    }

    let settings = Settings {
        theme: Some("dark".to_string()),
        retries: None,
    };
    let text = to_string(&settings).unwrap();
    assert_eq!(text, "theme: dark\nretries: null");

    let back: Settings = from_str(&text).unwrap();
    assert_eq!(settings, back);
}

#[test]
fn maps_round_trip() {
    let mut scores: BTreeMap<String, i32> = BTreeMap::new();
    scores.insert("ada".to_string(), 95);
    scores.insert("grace".to_string(), 98);

    let text = to_string(&scores).unwrap();
    let back: BTreeMap<String, i32> = from_str(&text).unwrap();
    assert_eq!(scores, back);
}

#[test]
fn unit_enums() {
    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    enum Status {
        Active,
        Suspended,
    }

    #[derive(Serialize, Deserialize, Debug, PartialEq)]
    struct Account {
        name: String,
        status: Status,
    }

    let account = Account {
        name: "ada".to_string(),
        status: Status::Active,
    };
    let text = to_string(&account).unwrap();
    assert_eq!(text, "name: ada\nstatus: Active");

    let back: Account = from_str(&text).unwrap();
    assert_eq!(account, back);
}

#[test]
fn custom_delimiter_round_trip() {
    let user = User {
        id: 1,
        name: "Bob".to_string(),
        active: false,
        tags: vec!["a".to_string(), "b".to_string()],
    };

    for delimiter in [Delimiter::Comma, Delimiter::Tab, Delimiter::Pipe] {
        let opts = EncodeOptions::new().with_delimiter(delimiter);
        let text = to_string_with_options(&user, &opts).unwrap();
        let back: User = from_str(&text).unwrap();
        assert_eq!(user, back, "delimiter {delimiter:?}");
    }
}

#[test]
fn strict_decode_of_encoder_output() {
    let order = Order {
        order_id: 1,
        customer: User {
            id: 2,
            name: "C".to_string(),
            active: true,
            tags: vec![],
        },
        items: vec![Product {
            sku: "S".to_string(),
            price: 1.5,
            quantity: 3,
        }],
        total: 4.5,
    };
    let text = to_string(&order).unwrap();
    let strict = DecodeOptions::new().with_strict(true);
    let back: Order = from_str_with_options(&text, &strict).unwrap();
    assert_eq!(order, back);
}

#[test]
fn to_value_produces_object() {
    let product = Product {
        sku: "A1".to_string(),
        price: 9.99,
        quantity: 2,
    };
    let value = to_value(&product).unwrap();
    let obj = value.as_object().unwrap();
    assert_eq!(obj.get("sku"), Some(&Value::from("A1")));
    assert_eq!(obj.get("quantity"), Some(&Value::from(2)));
}

#[test]
fn json_value_interop() {
    // serde_json values flow through the same serde bridge.
    let json = serde_json::json!({
        "name": "Ada",
        "scores": [1, 2, 3]
    });
    let text = to_string(&json).unwrap();
    let back: serde_json::Value = from_str(&text).unwrap();
    assert_eq!(json, back);
}

#[test]
fn strings_needing_quotes_round_trip() {
    let tricky = vec![
        "".to_string(),
        " leading".to_string(),
        "trailing ".to_string(),
        "true".to_string(),
        "123".to_string(),
        "a,b".to_string(),
        "colon: inside".to_string(),
        "line\nbreak".to_string(),
    ];
    let text = to_string(&tricky).unwrap();
    let back: Vec<String> = from_str(&text).unwrap();
    assert_eq!(tricky, back);
}
