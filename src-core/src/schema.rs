diesel::table! {
    households (id) {
        id -> Text,
        name -> Text,
        invite_code -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    profiles (id) {
        id -> Text,
        household_id -> Nullable<Text>,
        display_name -> Nullable<Text>,
        role -> Text,
        created_at -> Text,
    }
}

diesel::table! {
    accounts (id) {
        id -> Text,
        household_id -> Text,
        name -> Text,
        account_type -> Text,
        currency -> Text,
        initial_balance -> Text,
        icon -> Nullable<Text>,
        color -> Nullable<Text>,
        is_active -> Bool,
        sort_order -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    categories (id) {
        id -> Text,
        household_id -> Nullable<Text>,
        parent_id -> Nullable<Text>,
        name -> Text,
        icon -> Nullable<Text>,
        color -> Nullable<Text>,
        category_type -> Text,
        is_system -> Bool,
        sort_order -> Integer,
        created_at -> Text,
    }
}

diesel::table! {
    transactions (id) {
        id -> Text,
        household_id -> Text,
        profile_id -> Text,
        account_id -> Text,
        category_id -> Text,
        transaction_type -> Text,
        amount -> Text,
        date -> Text,
        note -> Nullable<Text>,
        transfer_to_account_id -> Nullable<Text>,
        recurring_id -> Nullable<Text>,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    budgets (id) {
        id -> Text,
        household_id -> Text,
        category_id -> Text,
        year -> Integer,
        month -> Integer,
        amount -> Text,
        alert_threshold -> Integer,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::table! {
    recurring_transactions (id) {
        id -> Text,
        household_id -> Text,
        profile_id -> Text,
        account_id -> Text,
        category_id -> Text,
        transaction_type -> Text,
        amount -> Text,
        description -> Nullable<Text>,
        frequency -> Text,
        day_of_month -> Nullable<Integer>,
        next_due_date -> Text,
        is_active -> Bool,
        auto_create -> Bool,
        created_at -> Text,
        updated_at -> Text,
    }
}

diesel::joinable!(profiles -> households (household_id));
diesel::joinable!(accounts -> households (household_id));
diesel::joinable!(transactions -> categories (category_id));
diesel::joinable!(budgets -> categories (category_id));
diesel::joinable!(recurring_transactions -> categories (category_id));

diesel::allow_tables_to_appear_in_same_query!(
    households,
    profiles,
    accounts,
    categories,
    transactions,
    budgets,
    recurring_transactions,
);
