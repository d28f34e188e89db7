//! User management commands.

use storekeep_core::{Address, NewUser, User, UserId, UserPatch};

use super::Context;

/// Arguments for `users create`.
pub struct CreateArgs {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub city: Option<String>,
    pub street: Option<String>,
    pub role: String,
    pub department: String,
    pub admin: bool,
    pub representative: bool,
}

/// Arguments for `users update`.
pub struct UpdateArgs {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub department: Option<String>,
}

/// List all users.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context) -> Result<(), Box<dyn std::error::Error>> {
    let users = ctx.users.list().await;
    if users.is_empty() {
        println!("No users");
        return Ok(());
    }
    for user in &users {
        print_user_row(user);
    }
    println!("{} user(s)", users.len());
    Ok(())
}

/// Show one user.
#[allow(clippy::print_stdout)]
pub async fn get(ctx: &Context, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    let user = ctx.users.get(UserId::new(id)).await?;
    println!("{}  {} {}", user.user_number, user.first_name, user.last_name);
    println!("  username:   {}", user.username);
    println!("  email:      {}", user.email);
    println!("  phone:      {}", user.phone);
    if let Some(address) = &user.address {
        println!("  address:    {}, {}", address.street, address.city);
    }
    println!("  role:       {}", user.role);
    println!("  department: {}", user.department);
    println!("  flags:      admin={} representative={}", user.admin, user.representative);
    Ok(())
}

/// Create a user.
#[allow(clippy::print_stdout)]
pub async fn create(ctx: &Context, args: CreateArgs) -> Result<(), Box<dyn std::error::Error>> {
    let address = match (args.city, args.street) {
        (Some(city), Some(street)) => Some(Address { city, street }),
        _ => None,
    };
    let user = ctx
        .users
        .create(NewUser {
            username: args.username,
            email: args.email,
            first_name: args.first_name,
            last_name: args.last_name,
            phone: args.phone,
            address,
            role: args.role,
            department: args.department,
            admin: args.admin,
            representative: args.representative,
        })
        .await?;
    println!("Created user {} ({})", user.id, user.user_number);
    Ok(())
}

/// Update a user.
#[allow(clippy::print_stdout)]
pub async fn update(
    ctx: &Context,
    id: i32,
    args: UpdateArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    let patch = UserPatch {
        username: args.username,
        email: args.email,
        first_name: args.first_name,
        last_name: args.last_name,
        phone: args.phone,
        role: args.role,
        department: args.department,
        ..UserPatch::default()
    };
    let user = ctx.users.update(UserId::new(id), patch).await?;
    println!("Updated user {}", user.id);
    Ok(())
}

/// Delete a user.
#[allow(clippy::print_stdout)]
pub async fn delete(ctx: &Context, id: i32) -> Result<(), Box<dyn std::error::Error>> {
    ctx.users.delete(UserId::new(id)).await?;
    println!("Deleted user {id}");
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_user_row(user: &User) {
    println!(
        "{}  {:<16} {:<28} {} {}",
        user.user_number, user.username, user.email, user.first_name, user.last_name
    );
}
