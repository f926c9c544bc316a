use application::UserApp;
use chrono::NaiveDate;
use domain::UserDetails;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🚀 Starting User Registry demo");

    let app = UserApp::new(18);
    let service = &app.user_service;

    let eric = service
        .register(UserDetails {
            email: "some.email@ukr.net".to_string(),
            first_name: "Eric".to_string(),
            last_name: "Brown".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2002, 3, 14).ok_or("bad date")?,
            address: Some("Lisova, 12".to_string()),
            phone_number: None,
        })
        .await?;
    println!("✅ Registered {} {} with id {}", eric.first_name, eric.last_name, eric.id);

    let mark = service
        .register(UserDetails {
            email: "some.existing.email@ukr.net".to_string(),
            first_name: "Mark".to_string(),
            last_name: "Lumberg".to_string(),
            birth_date: NaiveDate::from_ymd_opt(1996, 6, 19).ok_or("bad date")?,
            address: Some("NewStreet, 345".to_string()),
            phone_number: None,
        })
        .await?;
    println!("✅ Registered {} {} with id {}", mark.first_name, mark.last_name, mark.id);

    let fields = match json!({"lastName": "Smith", "address": "UnionStreet, 111"}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    let eric = service.update_user_info_partially(eric.id, &fields).await?;
    println!("✏️  Eric is now {} {} at {:?}", eric.first_name, eric.last_name, eric.address);

    let empty_name = match json!({"firstName": ""}) {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };
    if let Err(e) = service.update_user_info_partially(mark.id, &empty_name).await {
        println!("❌ Partial update refused: {}", e);
    }

    println!();
    println!("📊 Users born between 1995-01-01 and 2006-02-20:");
    let from = NaiveDate::from_ymd_opt(1995, 1, 1).ok_or("bad date")?;
    let to = NaiveDate::from_ymd_opt(2006, 2, 20).ok_or("bad date")?;
    for user in service.search_by_birth_date_range(from, to).await? {
        println!("   • #{} {} {} ({})", user.id, user.first_name, user.last_name, user.birth_date);
    }

    service.delete_user(mark.id).await?;
    println!();
    println!("🗑️  Deleted user {}; {} user(s) left", mark.id, service.list_users().await?.len());

    println!();
    println!("🏁 Demo complete!");
    Ok(())
}
