mod member_test;
mod period_test;
mod team_test;
