pub mod shared {
    pub mod infrastructure {
        pub mod change_outbox;
        pub mod entry_store;
    }
}

pub mod modules {
    pub mod timers {
        pub mod core {
            pub mod aggregate;
            pub mod duration;
            pub mod entry;
            pub mod error;
            pub mod transition;
        }
        pub mod use_cases {
            pub mod support;

            pub mod start_timer {
                pub mod handler;
                pub mod http;
            }
            pub mod pause_timer {
                pub mod handler;
                pub mod http;
            }
            pub mod resume_timer {
                pub mod handler;
                pub mod http;
            }
            pub mod stop_timer {
                pub mod handler;
                pub mod http;
            }
            pub mod edit_entry {
                pub mod handler;
                pub mod http;
            }
            pub mod delete_entry {
                pub mod handler;
                pub mod http;
            }
            pub mod list_entries {
                pub mod handler;
                pub mod http;
            }
        }
    }
}

pub mod shell;
