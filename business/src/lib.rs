pub mod application {
    pub mod notification {
        pub mod dispatch_email;
        pub mod fetch_secret;
        pub mod notify_watched_field;
        pub mod route_event;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod document {
        pub mod errors;
        pub mod model;
        pub mod path;
        pub mod repository;
    }
    pub mod notification {
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod subject;
        pub mod use_cases {
            pub mod dispatch_email;
            pub mod fetch_secret;
            pub mod notify_watched_field;
            pub mod route_event;
        }
    }
}
