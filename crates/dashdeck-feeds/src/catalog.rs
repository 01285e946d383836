//! Sample pools the activity generator draws from.

pub const USERS: [&str; 8] = [
    "John Smith",
    "Emily Davis",
    "Michael Brown",
    "Sarah Johnson",
    "David Wilson",
    "Jessica Taylor",
    "Robert Miller",
    "Lisa Anderson",
];

pub const PRODUCTS: [&str; 9] = [
    "Premium Headphones",
    "Wireless Keyboard",
    "Smart Watch",
    "Bluetooth Speaker",
    "Laptop Stand",
    "External SSD",
    "Wireless Mouse",
    "Monitor Stand",
    "USB-C Hub",
];

pub const LOCATIONS: [&str; 8] = [
    "New York, USA",
    "London, UK",
    "Tokyo, Japan",
    "Sydney, Australia",
    "Paris, France",
    "Berlin, Germany",
    "Toronto, Canada",
    "Mumbai, India",
];
