//! OpenAPI documentation aggregation

use utoipa::OpenApi;

use crate::error::ErrorResponse;
use trove_core::models::AssetImageResponse;

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::image_upload::upload_image,
        crate::handlers::image_serve::serve_image,
        crate::handlers::image_list::list_images,
        crate::handlers::image_delete::delete_image,
    ),
    components(schemas(AssetImageResponse, ErrorResponse)),
    tags(
        (name = "images", description = "Tenant-scoped asset photo storage and serving")
    )
)]
pub struct ApiDoc;
