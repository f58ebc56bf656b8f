//! 计算建立订单的 CheckValue 和交易回传的 CheckCode
//!
//! cargo run -p spgateway --example order_check

use spgateway::logging::{self, LogConfig};
use spgateway::{Config, OrderCheckCode, OrderCheckValue, Store};

fn main() -> anyhow::Result<()> {
    logging::init(&LogConfig {
        level: "debug".to_string(),
        ..Default::default()
    })?;

    let store = Store::new(Config::new("123456", "1A3S21DAS3D1AS65D1", "1AS56D1AS24D"));

    let order = OrderCheckValue {
        amt: 200,
        merchant_order_no: "20140901001".to_string(),
        time_stamp: "1403243286".to_string(),
        version: "1.1".to_string(),
        ..Default::default()
    };

    // 841F57D750FB4B04B62DDC3ECDC26F1F4028410927DD28BD5B2E34791CC434D2
    println!("CheckValue: {}", store.order_check_value(order));

    let store = Store::new(Config::new("1422967", "abcdefg", "1234567"));

    let order = OrderCheckCode {
        amt: 100,
        merchant_order_no: "840f022".to_string(),
        trade_no: "14061313541640927".to_string(),
        ..Default::default()
    };

    // 62C687AF6409E46E79769FAF54F54FE7E75AAE50BAF0767752A5C337670B8EDB
    println!("CheckCode: {}", store.order_check_code(order));

    Ok(())
}
