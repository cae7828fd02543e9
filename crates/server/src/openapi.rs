use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc {
    #[schema(example = "Course not found")]
    pub message: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ContentTypeDoc { Text, Video, Audio }

#[derive(Serialize, ToSchema)]
pub struct ContentDoc {
    #[serde(rename = "type")]
    pub kind: ContentTypeDoc,
    #[schema(example = "https://example.com/video.mp4")]
    pub data: String,
}

#[derive(ToSchema)]
pub struct LessonDoc {
    #[schema(example = "Lesson 1: Basics")]
    pub title: String,
    #[schema(example = "An overview of the basics")]
    pub description: Option<String>,
    pub topics: Vec<String>,
    pub content: Vec<ContentDoc>,
}

#[derive(ToSchema)]
pub struct ModuleDoc {
    #[schema(example = "Getting Started")]
    pub title: String,
    pub lessons: Vec<LessonDoc>,
}

#[derive(ToSchema)]
pub struct CourseDoc {
    #[schema(example = 1)]
    pub id: u64,
    #[schema(example = "Introduction to Programming")]
    pub title: String,
    #[schema(example = "A beginner-friendly course on programming")]
    pub description: String,
    pub modules: Vec<ModuleDoc>,
}

#[derive(ToSchema)]
pub struct CourseInputDoc {
    pub title: String,
    pub description: String,
    pub modules: Vec<ModuleDoc>,
}

#[derive(ToSchema)]
pub struct CoursePatchDoc {
    #[schema(example = "Updated Course Title")]
    pub title: Option<String>,
    #[schema(example = "Updated course description")]
    pub description: Option<String>,
    pub modules: Option<Vec<ModuleDoc>>,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Course API",
        description = "API Documentation for managing courses, modules, lessons, and content"
    ),
    paths(
        crate::routes::health,
        crate::routes::courses::list_courses,
        crate::routes::courses::get_course,
        crate::routes::courses::create_course,
        crate::routes::courses::update_course,
        crate::routes::courses::delete_course,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ContentTypeDoc,
            ContentDoc,
            LessonDoc,
            ModuleDoc,
            CourseDoc,
            CourseInputDoc,
            CoursePatchDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "courses")
    )
)]
pub struct ApiDoc;
