// 树算法模块
//
// 树的核心算法按功能分解为不同的子模块，所有维度的树共用同一份实现：
// - insert: 插入、分裂和子节点放置
// - search: 惰性查询迭代器（边界框、区域、距离）
// - stats: 结构统计和调试日志

pub mod insert;
pub mod search;
pub mod stats;
