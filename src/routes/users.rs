use actix_web::{web, HttpResponse};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::models::{
    Applicant, AuthResponse, ErrorResponse, LoginRequest, RegisterRequest, Role, SchemesResponse, User,
    UserView,
};
use crate::routes::AppState;

/// Configure user registration, login and scheme lookup routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/register", web::post().to(register))
        .route("/login", web::post().to(login))
        .route("/user/schemes/{mobile_number}", web::get().to(user_schemes));
}

/// Recompute eligibility against the current catalog and persist it
///
/// Runs on every login and scheme lookup. The stored snapshot is always
/// replaced, never consulted.
async fn refresh_eligibility(state: &AppState, user: &mut User) -> Result<(), ErrorResponse> {
    let applicant = Applicant::from(&*user);
    let result = state.matcher.find_eligible(&applicant);

    tracing::info!(
        "User {} eligible for {} of {} schemes",
        user.mobile_number,
        result.schemes.len(),
        result.total_schemes
    );

    user.scheme_eligibility = result.to_owned_schemes();
    user.updated_at = Utc::now();
    state.store.save_eligibility(user).await?;
    Ok(())
}

/// Register a new user
///
/// POST /register
async fn register(
    state: web::Data<AppState>,
    req: web::Json<RegisterRequest>,
) -> Result<HttpResponse, ErrorResponse> {
    let req = req.into_inner();

    let password = match req.password.as_deref() {
        Some(password) if !password.is_empty() => password.to_string(),
        _ => {
            return Err(ErrorResponse::bad_request(
                "Password is required",
                "password field is missing",
            ))
        }
    };

    if let Err(errors) = req.validate() {
        tracing::warn!("Validation failed for registration: {}", errors);
        return Err(ErrorResponse::bad_request("Validation failed", errors.to_string()));
    }

    let dob = req.date_of_birth().ok_or_else(|| {
        ErrorResponse::bad_request("Validation failed", "dob must be a date such as 1990-04-12")
    })?;
    let income = req
        .income
        .ok_or_else(|| ErrorResponse::bad_request("Validation failed", "income is required"))?;

    let hasher = state.hasher;
    let password_hash = web::block(move || hasher.hash(&password)).await??;

    let now = Utc::now();
    let mut user = User {
        id: Uuid::new_v4(),
        name: req.name,
        middle_name: req.middle_name,
        last_name: req.last_name,
        father_or_husband_name: req.father_or_husband_name,
        mobile_number: req.mobile_number.trim().to_string(),
        email: req.email,
        gender: req.gender,
        dob,
        caste: req.caste,
        income,
        aadhar_number: req.aadhar_number,
        pan_number: req.pan_number,
        password_hash,
        address: req.address,
        role: Role::User,
        scheme_eligibility: Vec::new(),
        created_at: now,
        updated_at: now,
    };

    let result = state.matcher.find_eligible(&Applicant::from(&user));
    user.scheme_eligibility = result.to_owned_schemes();

    state.store.insert(&user).await?;

    tracing::info!(
        "Registered user {} eligible for {} of {} schemes",
        user.mobile_number,
        user.scheme_eligibility.len(),
        result.total_schemes
    );

    Ok(HttpResponse::Created().json(AuthResponse {
        message: "User registered successfully".to_string(),
        user: UserView::from(&user),
    }))
}

/// Log in and re-check eligibility
///
/// POST /login
async fn login(
    state: web::Data<AppState>,
    req: web::Json<LoginRequest>,
) -> Result<HttpResponse, ErrorResponse> {
    let (mobile_number, password) = req.credentials().ok_or_else(|| {
        ErrorResponse::bad_request(
            "Mobile number and password are required",
            "mobileNumber and password must both be provided",
        )
    })?;

    let mut user = state
        .store
        .find_by_mobile(mobile_number)
        .await?
        .ok_or_else(|| ErrorResponse::not_found("User not found", format!("No user with mobile number {}", mobile_number)))?;

    let hasher = state.hasher;
    let password = password.to_string();
    let password_hash = user.password_hash.clone();
    let valid = web::block(move || hasher.verify(&password, &password_hash)).await??;

    if !valid {
        tracing::warn!("Invalid password for {}", user.mobile_number);
        return Err(ErrorResponse::unauthorized("Invalid password", "Password does not match"));
    }

    refresh_eligibility(&state, &mut user).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        message: "Login successful".to_string(),
        user: UserView::from(&user),
    }))
}

/// Fetch a user's eligible schemes, recomputed against the current catalog
///
/// GET /user/schemes/{mobile_number}
async fn user_schemes(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ErrorResponse> {
    let mobile_number = path.into_inner();

    let mut user = state
        .store
        .find_by_mobile(&mobile_number)
        .await?
        .ok_or_else(|| ErrorResponse::not_found("User not found", format!("No user with mobile number {}", mobile_number)))?;

    refresh_eligibility(&state, &mut user).await?;

    Ok(HttpResponse::Ok().json(SchemesResponse {
        message: "Eligible schemes fetched successfully".to_string(),
        scheme_eligibility: user.scheme_eligibility,
    }))
}
