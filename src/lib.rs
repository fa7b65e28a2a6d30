pub mod core {
    pub mod aggregate;
    pub mod codes;
    pub mod consistency;
    pub mod event;
    pub mod invoice;
    pub mod naming;
    pub mod parser;
    pub mod ports;
    pub mod report;
    pub mod validation;
}

pub mod application {
    pub mod errors;
    pub mod generate_invoices;
    pub mod generate_report;
}

pub mod adapters {
    pub mod in_memory {
        pub mod in_memory_billing;
        pub mod in_memory_calendar;
        pub mod in_memory_report_store;
    }
}

pub mod shell;
