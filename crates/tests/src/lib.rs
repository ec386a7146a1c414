#[cfg(test)]
mod common;

#[cfg(test)]
mod session_tests;

#[cfg(test)]
mod student_dashboard_tests;

#[cfg(test)]
mod admin_tests;

#[cfg(test)]
mod drilldown_tests;

#[cfg(test)]
mod api_tests;
