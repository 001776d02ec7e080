// Presentation layer - Page surfaces the enhancer can drive
pub mod page;
pub mod virtual_page;
