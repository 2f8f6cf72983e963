//! Database seeder for Fintrack development and testing.
//!
//! Seeds a demo user with two accounts, a month of expenses and incomes,
//! a savings goal, and the default budget split.
//!
//! Usage: cargo run --bin seeder

use chrono::{Datelike, Utc};
use rust_decimal_macros::dec;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use uuid::Uuid;

use fintrack_core::auth::hash_password;
use fintrack_db::entities::{
    accounts, expenses, goals, incomes, user_preferences, users,
    sea_orm_active_enums::{AccountType, ExpenseGroup},
};

/// Demo user ID (consistent for all seeds)
const DEMO_USER_ID: &str = "00000000-0000-0000-0000-000000000001";
/// Demo wallet account ID
const DEMO_WALLET_ID: &str = "00000000-0000-0000-0000-000000000002";
/// Demo savings account ID
const DEMO_SAVINGS_ID: &str = "00000000-0000-0000-0000-000000000003";

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let database_url =
        std::env::var("DATABASE_URL").expect("DATABASE_URL must be set in environment");

    println!("Connecting to database...");
    let db = fintrack_db::connect(&database_url)
        .await
        .expect("Failed to connect to database");

    println!("Seeding demo user...");
    seed_demo_user(&db).await;

    println!("Seeding accounts...");
    seed_accounts(&db).await;

    println!("Seeding preferences...");
    seed_preferences(&db).await;

    println!("Seeding incomes and expenses...");
    seed_transactions(&db).await;

    println!("Seeding goal...");
    seed_goal(&db).await;

    println!("Seeding complete!");
}

fn demo_user_id() -> Uuid {
    Uuid::parse_str(DEMO_USER_ID).unwrap()
}

fn demo_wallet_id() -> Uuid {
    Uuid::parse_str(DEMO_WALLET_ID).unwrap()
}

fn demo_savings_id() -> Uuid {
    Uuid::parse_str(DEMO_SAVINGS_ID).unwrap()
}

async fn seed_demo_user(db: &DatabaseConnection) {
    if users::Entity::find_by_id(demo_user_id())
        .one(db)
        .await
        .expect("Failed to query users")
        .is_some()
    {
        println!("  Demo user already exists, skipping");
        return;
    }

    let password_hash = hash_password("demo-password").expect("Failed to hash password");
    let now = Utc::now().into();

    users::ActiveModel {
        id: Set(demo_user_id()),
        email: Set("demo@fintrack.dev".to_string()),
        password_hash: Set(password_hash),
        first_name: Set("Demo".to_string()),
        last_name: Set("User".to_string()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert demo user");
}

async fn seed_accounts(db: &DatabaseConnection) {
    if accounts::Entity::find_by_id(demo_wallet_id())
        .one(db)
        .await
        .expect("Failed to query accounts")
        .is_some()
    {
        println!("  Accounts already exist, skipping");
        return;
    }

    let now = Utc::now().into();

    accounts::ActiveModel {
        id: Set(demo_wallet_id()),
        user_id: Set(demo_user_id()),
        name: Set("General Wallet".to_string()),
        account_type: Set(AccountType::Checking),
        balance: Set(dec!(2500)),
        opening_balance: Set(dec!(2500)),
        created_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert wallet");

    accounts::ActiveModel {
        id: Set(demo_savings_id()),
        user_id: Set(demo_user_id()),
        name: Set("Rainy Day".to_string()),
        account_type: Set(AccountType::Savings),
        balance: Set(dec!(8000)),
        opening_balance: Set(dec!(8000)),
        created_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert savings account");
}

async fn seed_preferences(db: &DatabaseConnection) {
    let existing = user_preferences::Entity::find().one(db).await;
    if matches!(existing, Ok(Some(_))) {
        println!("  Preferences already exist, skipping");
        return;
    }

    let now = Utc::now().into();
    user_preferences::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(demo_user_id()),
        essentials_percent: Set(dec!(50)),
        leisure_percent: Set(dec!(30)),
        investment_percent: Set(dec!(20)),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert preferences");
}

async fn seed_transactions(db: &DatabaseConnection) {
    let existing = incomes::Entity::find().one(db).await;
    if matches!(existing, Ok(Some(_))) {
        println!("  Transactions already exist, skipping");
        return;
    }

    let today = Utc::now().date_naive();
    let month = i32::try_from(today.month()).unwrap_or_default();
    let year = today.year();
    let now = Utc::now().into();

    incomes::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(demo_user_id()),
        account_id: Set(demo_wallet_id()),
        description: Set("Salary".to_string()),
        amount: Set(dec!(5000)),
        date: Set(today),
        month: Set(month),
        year: Set(year),
        created_at: Set(now),
    }
    .insert(db)
    .await
    .expect("Failed to insert income");

    let demo_expenses = [
        ("Rent", dec!(1400), "housing", ExpenseGroup::Essentials, "debit"),
        ("Groceries", dec!(380), "food", ExpenseGroup::Essentials, "card"),
        ("Concert tickets", dec!(120), "going out", ExpenseGroup::Leisure, "card"),
        ("Index fund", dec!(600), "etf", ExpenseGroup::Investment, "transfer"),
    ];

    for (description, amount, category, group, method) in demo_expenses {
        expenses::ActiveModel {
            id: Set(Uuid::now_v7()),
            user_id: Set(demo_user_id()),
            account_id: Set(demo_wallet_id()),
            description: Set(description.to_string()),
            amount: Set(amount),
            category: Set(category.to_string()),
            group: Set(group),
            payment_method: Set(method.to_string()),
            date: Set(today),
            month: Set(month),
            year: Set(year),
            created_at: Set(now),
        }
        .insert(db)
        .await
        .expect("Failed to insert expense");
    }
}

async fn seed_goal(db: &DatabaseConnection) {
    let existing = goals::Entity::find().one(db).await;
    if matches!(existing, Ok(Some(_))) {
        println!("  Goal already exists, skipping");
        return;
    }

    goals::ActiveModel {
        id: Set(Uuid::now_v7()),
        user_id: Set(demo_user_id()),
        name: Set("Emergency fund".to_string()),
        target_amount: Set(dec!(10000)),
        current_amount: Set(dec!(8000)),
        deadline: Set(None),
        completed_at: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(db)
    .await
    .expect("Failed to insert goal");
}
