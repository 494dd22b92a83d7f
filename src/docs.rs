use crate::api::absence::{AbsenceFilter, UpsertAbsence};
use crate::api::employee::{CreateEmployee, UpdateEmployee};
use crate::api::request::{CreateRequest, RequestFilter};
use crate::api::store::CreateStore;
use crate::engine::summary::BalanceSummary;
use crate::model::absence::{AbsenceRecord, AbsenceType};
use crate::model::employee::Employee;
use crate::model::request::{HolidayRequest, RequestStatus};
use crate::model::store::Store;
use utoipa::Modify;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Holiday Tracker API",
        version = "1.0.0",
        description = r#"
## Staff Holiday Tracker

Tracks employee absences (holiday, sick, personal days) across a small
multi-store organization.

### Key Features
- **Requests**
  - Staff submit time-off requests; admins approve or reject them
  - Approved requests can go through a cancellation workflow with its own
    admin sign-off
  - Same-store clash report over the pending queue
- **Calendar**
  - Absence records per employee per weekday, editable directly by admins
- **Balances**
  - Per-employee holiday/sick/personal counts and remaining entitlement

### Security
All endpoints expect a **JWT Bearer token** issued by the identity provider.
Admin-only operations check the role claim.
"#,
    ),
    paths(
        crate::api::request::create_request,
        crate::api::request::list_requests,
        crate::api::request::get_request,
        crate::api::request::edit_request,
        crate::api::request::approve_request,
        crate::api::request::reject_request,
        crate::api::request::request_cancellation,
        crate::api::request::approve_cancellation,
        crate::api::request::decline_cancellation,
        crate::api::request::clash_report,

        crate::api::absence::list_absences,
        crate::api::absence::upsert_absence,
        crate::api::absence::delete_absence,

        crate::api::employee::create_employee,
        crate::api::employee::get_employee,
        crate::api::employee::list_employees,
        crate::api::employee::update_employee,
        crate::api::employee::delete_employee,

        crate::api::store::create_store,
        crate::api::store::list_stores,
        crate::api::store::delete_store,

        crate::api::summary::balances
    ),
    components(
        schemas(
            AbsenceType,
            AbsenceRecord,
            AbsenceFilter,
            UpsertAbsence,
            Employee,
            CreateEmployee,
            UpdateEmployee,
            Store,
            CreateStore,
            RequestStatus,
            HolidayRequest,
            CreateRequest,
            RequestFilter,
            BalanceSummary
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Requests", description = "Time-off request lifecycle APIs"),
        (name = "Absence", description = "Calendar absence record APIs"),
        (name = "Employee", description = "Employee management APIs"),
        (name = "Store", description = "Store management APIs"),
        (name = "Summary", description = "Balance summary APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
